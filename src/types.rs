use nalgebra::Point2;
use serde::Serialize;

pub use crate::image::{BinaryMask, ImageU8};

/// Raw skeleton walk: integer pixel coordinates `[x, y]` in traversal order.
pub type PixelPath = Vec<[usize; 2]>;

/// One segmented shape: its filled outer-contour mask and stable id.
#[derive(Clone, Debug)]
pub struct ObjectMask {
    pub object_id: usize,
    pub mask: BinaryMask,
}

/// Canonical centerline: de-duplicated and consistently oriented.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub points: Vec<Point2<f64>>,
}

impl Path {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TrajectoryPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn xy(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// Ordered 3D samples along one path of one object.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trajectory {
    pub object_id: usize,
    pub points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn new(object_id: usize, points: Vec<TrajectoryPoint>) -> Self {
        Self { object_id, points }
    }

    /// Pair a canonical path with its z-profile.
    pub fn from_path(object_id: usize, path: &Path, z: &[f64]) -> Self {
        debug_assert_eq!(path.len(), z.len());
        let points = path
            .points
            .iter()
            .zip(z.iter())
            .map(|(p, &z)| TrajectoryPoint::new(p.x, p.y, z))
            .collect();
        Self { object_id, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Flat output row; rows of one path are contiguous and share `path_index`.
/// Field names are serialized as written.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TrajectoryRecord {
    pub object_id: usize,
    pub path_index: usize,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Flatten trajectories into the tabular record set, preserving order.
pub fn to_records(trajectories: &[Trajectory]) -> Vec<TrajectoryRecord> {
    trajectories
        .iter()
        .enumerate()
        .flat_map(|(path_index, t)| {
            t.points.iter().map(move |p| TrajectoryRecord {
                object_id: t.object_id,
                path_index,
                x: p.x,
                y: p.y,
                z: p.z,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_serialize_with_snake_case_keys() {
        let trajs = [
            Trajectory::new(2, vec![TrajectoryPoint::new(1.0, 2.0, 0.5)]),
            Trajectory::new(
                5,
                vec![
                    TrajectoryPoint::new(3.0, 4.0, 1.0),
                    TrajectoryPoint::new(5.0, 6.0, 3.0),
                ],
            ),
        ];
        let records = to_records(&trajs);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].path_index, 1);
        assert_eq!(records[2].object_id, 5);

        let json = serde_json::to_string(&records).unwrap();
        assert!(json.starts_with(r#"[{"object_id":2,"path_index":0,"x":1.0,"y":2.0,"z":0.5}"#));
        assert!(!json.contains("objectId"));

        let traj_json = serde_json::to_value(&trajs[0]).unwrap();
        assert_eq!(traj_json["object_id"], 2);
    }
}

/// A single LiDAR return in the sensor frame.
///
/// The sensor frame is centered at the LiDAR with x facing forward, y facing left and z facing
/// up, all in metres.
#[derive(Debug, Clone, Copy, Default, PartialEq, bincode::Encode, bincode::Decode)]
pub struct LidarPoint {
    /// Forward position in metres.
    pub x: f64,
    /// Left position in metres.
    pub y: f64,
    /// Upward position in metres.
    pub z: f64,
    /// Reflectance of the return.
    pub r: f64,
}

impl LidarPoint {
    /// Create a new point from its coordinates and reflectance.
    pub fn new(x: f64, y: f64, z: f64, r: f64) -> Self {
        Self { x, y, z, r }
    }

    /// The point as homogeneous coordinates `[x, y, z, 1]`.
    #[inline]
    pub fn to_homogeneous(&self) -> [f64; 4] {
        [self.x, self.y, self.z, 1.0]
    }
}

impl From<[f64; 4]> for LidarPoint {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

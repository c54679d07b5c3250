//! Just enough quaternion math to steer a vantage orientation.

/// Unit quaternion, `w + xi + yj + zk`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Build from intrinsic XYZ Euler angles, in radians.
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        let (sx, cx) = (x * 0.5).sin_cos();
        let (sy, cy) = (y * 0.5).sin_cos();
        let (sz, cz) = (z * 0.5).sin_cos();
        Quat {
            x: sx * cy * cz + cx * sy * sz,
            y: cx * sy * cz - sx * cy * sz,
            z: cx * cy * sz + sx * sy * cz,
            w: cx * cy * cz - sx * sy * sz,
        }
        .normalized()
    }

    pub fn dot(self, other: Quat) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn normalized(self) -> Quat {
        let len = self.dot(self).sqrt();
        if len == 0.0 {
            return Quat::IDENTITY;
        }
        Quat {
            x: self.x / len,
            y: self.y / len,
            z: self.z / len,
            w: self.w / len,
        }
    }

    /// Spherical interpolation from `self` toward `target` by fraction `t`.
    ///
    /// Takes the shorter arc. Falls back to normalized linear interpolation
    /// when the endpoints are nearly parallel.
    pub fn slerp(self, target: Quat, t: f32) -> Quat {
        let mut dot = self.dot(target);
        let mut end = target;
        if dot < 0.0 {
            dot = -dot;
            end = Quat {
                x: -target.x,
                y: -target.y,
                z: -target.z,
                w: -target.w,
            };
        }

        if dot > 0.9995 {
            return Quat {
                x: self.x + (end.x - self.x) * t,
                y: self.y + (end.y - self.y) * t,
                z: self.z + (end.z - self.z) * t,
                w: self.w + (end.w - self.w) * t,
            }
            .normalized();
        }

        let theta = dot.clamp(-1.0, 1.0).acos();
        let sin_theta = theta.sin();
        let a = ((1.0 - t) * theta).sin() / sin_theta;
        let b = (t * theta).sin() / sin_theta;
        Quat {
            x: a * self.x + b * end.x,
            y: a * self.y + b * end.y,
            z: a * self.z + b * end.z,
            w: a * self.w + b * end.w,
        }
        .normalized()
    }

    /// Rotate a vector by this quaternion.
    pub fn rotate(self, v: [f32; 3]) -> [f32; 3] {
        // v' = v + 2w(u x v) + 2(u x (u x v)), u = (x, y, z)
        let u = [self.x, self.y, self.z];
        let uv = cross(u, v);
        let uuv = cross(u, uv);
        [
            v[0] + 2.0 * (self.w * uv[0] + uuv[0]),
            v[1] + 2.0 * (self.w * uv[1] + uuv[1]),
            v[2] + 2.0 * (self.w * uv[2] + uuv[2]),
        ]
    }

    /// Angle to another orientation, in radians.
    pub fn angle_to(self, other: Quat) -> f32 {
        let dot = self.dot(other).abs().clamp(0.0, 1.0);
        2.0 * dot.acos()
    }
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn rotation_about_z_maps_x_to_y() {
        let q = Quat::from_euler(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let v = q.rotate([1.0, 0.0, 0.0]);
        assert!((v[0]).abs() < EPS && (v[1] - 1.0).abs() < EPS && v[2].abs() < EPS);
    }

    #[test]
    fn identity_rotation_leaves_vectors_unchanged() {
        let v = Quat::IDENTITY.rotate([0.3, -0.7, 0.2]);
        assert_eq!(v, [0.3, -0.7, 0.2]);
    }

    #[test]
    fn slerp_endpoints() {
        let a = Quat::IDENTITY;
        let b = Quat::from_euler(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        let start = a.slerp(b, 0.0);
        let end = a.slerp(b, 1.0);
        assert!(start.angle_to(a) < EPS);
        assert!(end.angle_to(b) < EPS);
    }

    #[test]
    fn repeated_partial_slerp_converges_monotonically() {
        let target = Quat::from_euler(0.6, -0.6, 0.0);
        let mut current = Quat::IDENTITY;
        let mut last_angle = current.angle_to(target);
        for _ in 0..40 {
            current = current.slerp(target, 0.25);
            let angle = current.angle_to(target);
            assert!(angle <= last_angle + EPS);
            last_angle = angle;
        }
        assert!(last_angle < 1e-3);
    }

    #[test]
    fn slerp_takes_shorter_arc_with_negated_target() {
        let a = Quat::from_euler(0.3, 0.0, 0.0);
        let negated = Quat {
            x: -a.x,
            y: -a.y,
            z: -a.z,
            w: -a.w,
        };
        // Same rotation, opposite sign: interpolation should stay put.
        let mid = a.slerp(negated, 0.5);
        assert!(mid.angle_to(a) < 1e-3);
    }
}

/// Orthonormal basis around a unit z-axis, used to orient canonical
/// hemisphere/cone samples.
#[derive(Copy, Clone)]
pub struct Onb {
    x_axis: glam::Vec3A,
    y_axis: glam::Vec3A,
    z_axis: glam::Vec3A,
}

impl Onb {
    /// Branchless construction from a unit vector (Duff et al.).
    pub fn from_w(w: glam::Vec3A) -> Self {
        let z_axis = w.normalize();
        let sign = if z_axis.z >= 0.0 { 1.0 } else { -1.0 };
        let a = -1.0 / (sign + z_axis.z);
        let b = z_axis.x * z_axis.y * a;
        let x_axis = glam::Vec3A::new(
            1.0 + sign * z_axis.x * z_axis.x * a,
            sign * b,
            -sign * z_axis.x,
        );
        let y_axis = glam::Vec3A::new(b, sign + z_axis.y * z_axis.y * a, -z_axis.y);
        Self {
            x_axis,
            y_axis,
            z_axis,
        }
    }

    pub fn w(&self) -> glam::Vec3A {
        self.z_axis
    }

    /// Maps a vector expressed in this basis (z up) into world space.
    pub fn local(&self, v: glam::Vec3A) -> glam::Vec3A {
        self.x_axis * v.x + self.y_axis * v.y + self.z_axis * v.z
    }
}

pub fn reflect(v: glam::Vec3A, n: glam::Vec3A) -> glam::Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// `uv` must be unit length, `etai_over_etat` the ratio of refractive
/// indices across the interface.
pub fn refract(uv: glam::Vec3A, n: glam::Vec3A, etai_over_etat: f32) -> glam::Vec3A {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Schlick's polynomial approximation of Fresnel reflectance.
pub fn schlick(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = (1.0 - ref_idx) / (1.0 + ref_idx);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflection_is_mirror_symmetric() {
        let v = glam::Vec3A::new(1.0, -1.0, 0.0).normalize();
        let reflected = reflect(v, glam::Vec3A::Y);
        assert!((reflected - glam::Vec3A::new(1.0, 1.0, 0.0).normalize()).length() < 1e-5);
    }

    #[test]
    fn straight_on_refraction_is_undeflected() {
        let refracted = refract(-glam::Vec3A::Y, glam::Vec3A::Y, 1.5);
        assert!((refracted - -glam::Vec3A::Y).length() < 1e-5);
    }

    #[test]
    fn schlick_reaches_one_at_grazing_incidence() {
        assert!((schlick(0.0, 1.5) - 1.0).abs() < 1e-4);
        let normal_incidence = schlick(1.0, 1.5);
        assert!((normal_incidence - 0.04).abs() < 1e-3);
    }
}

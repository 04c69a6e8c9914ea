//! Transparency sorting
//!
//! Transparent draws blend over whatever is already in the colour buffer, so
//! they go back to front: the command whose center lies farthest along the
//! camera's forward axis is drawn first. Ties keep their collection order.

use crate::foundation::math::Vec3;

use super::commands::RenderCommand;

/// Signed distance of `center` along `forward` from `camera_position`
///
/// `forward` need not be normalised; only the ordering it induces matters.
pub fn signed_depth(center: &Vec3, camera_position: &Vec3, forward: &Vec3) -> f32 {
    (center - camera_position).dot(forward)
}

/// Order `commands` farthest first along `forward`
pub fn sort_back_to_front(commands: &mut [RenderCommand], camera_position: &Vec3, forward: &Vec3) {
    commands.sort_by(|a, b| {
        let depth_a = signed_depth(&a.center, camera_position, forward);
        let depth_b = signed_depth(&b.center, camera_position, forward);
        depth_b.total_cmp(&depth_a)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::forward::test_support::Fixture;

    #[test]
    fn test_signed_depth_is_negative_behind_camera() {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        assert!(signed_depth(&Vec3::new(0.0, 0.0, -3.0), &Vec3::zeros(), &forward) > 0.0);
        assert!(signed_depth(&Vec3::new(0.0, 0.0, 3.0), &Vec3::zeros(), &forward) < 0.0);
    }

    #[test]
    fn test_sort_farthest_first() {
        let fixture = Fixture::new();
        let material = fixture.material(true);
        let mut commands: Vec<RenderCommand> = [-5.0, -10.0, 2.0, -7.5]
            .iter()
            .map(|&z| fixture.command(Vec3::new(0.0, 0.0, z), &material))
            .collect();

        sort_back_to_front(&mut commands, &Vec3::zeros(), &Vec3::new(0.0, 0.0, -1.0));

        let order: Vec<f32> = commands.iter().map(|c| c.center.z).collect();
        assert_eq!(order, vec![-10.0, -7.5, -5.0, 2.0]);
    }

    #[test]
    fn test_sort_is_relative_to_camera_position() {
        let fixture = Fixture::new();
        let material = fixture.material(true);
        let mut commands = vec![
            fixture.command(Vec3::new(1.0, 0.0, 0.0), &material),
            fixture.command(Vec3::new(9.0, 0.0, 0.0), &material),
        ];

        // Looking down -X from x = 10: the command at x = 1 is farther
        sort_back_to_front(&mut commands, &Vec3::new(10.0, 0.0, 0.0), &Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(commands[0].center.x, 1.0);
    }

    #[test]
    fn test_adjacent_pairs_descend() {
        let fixture = Fixture::new();
        let material = fixture.material(true);
        let forward = Vec3::new(0.3, -0.2, -0.9);
        let mut commands: Vec<RenderCommand> = (0..12)
            .map(|i| {
                let t = i as f32;
                fixture.command(Vec3::new((t * 1.7).sin() * 5.0, (t * 0.3).cos(), -t * 0.8 + 3.0), &material)
            })
            .collect();

        sort_back_to_front(&mut commands, &Vec3::zeros(), &forward);

        for pair in commands.windows(2) {
            let a = signed_depth(&pair[0].center, &Vec3::zeros(), &forward);
            let b = signed_depth(&pair[1].center, &Vec3::zeros(), &forward);
            assert!(a >= b, "{a} should not precede {b}");
        }
    }
}

use eframe::egui::Vec2;

use super::SimNode;

/// Coincident points are treated as one unit apart. Their direction vector is
/// zero, so the pair exchanges no force.
fn separation(delta: Vec2) -> f32 {
    let distance = delta.length();
    if distance > 0.0 { distance } else { 1.0 }
}

pub(super) fn apply_center_gravity(nodes: &mut [SimNode], center: Vec2, strength: f32) {
    for node in nodes {
        node.velocity += (center - node.pos) * strength;
    }
}

pub(super) fn apply_repulsion(nodes: &mut [SimNode], strength: f32) {
    let node_count = nodes.len();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = nodes[i].pos - nodes[j].pos;
            let distance = separation(delta);
            let push = delta / distance * (strength / (distance * distance));

            nodes[i].velocity += push;
            nodes[j].velocity -= push;
        }
    }
}

pub(super) fn apply_springs(
    nodes: &mut [SimNode],
    links: &[(usize, usize)],
    ideal_length: f32,
    strength: f32,
) {
    let node_count = nodes.len();
    for &(source, target) in links {
        if source >= node_count || target >= node_count {
            continue;
        }

        let delta = nodes[target].pos - nodes[source].pos;
        let distance = separation(delta);
        let pull = delta / distance * ((distance - ideal_length) * strength);

        nodes[source].velocity += pull;
        nodes[target].velocity -= pull;
    }
}

pub(super) fn integrate(nodes: &mut [SimNode], size: Vec2, damping: f32, padding: f32) {
    for node in nodes {
        node.velocity *= damping;
        node.pos += node.velocity;
        node.pos.x = clamp_axis(node.pos.x, size.x, padding);
        node.pos.y = clamp_axis(node.pos.y, size.y, padding);
    }
}

/// `min` before `max` so an extent under twice the padding pins to `padding`
/// instead of tripping `f32::clamp`'s `min <= max` assertion.
fn clamp_axis(value: f32, extent: f32, padding: f32) -> f32 {
    value.min(extent - padding).max(padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::Category;
    use eframe::egui::vec2;

    fn node(id: &str, x: f32, y: f32) -> SimNode {
        SimNode {
            id: id.to_owned(),
            category: Category::Journal,
            pos: vec2(x, y),
            velocity: Vec2::ZERO,
        }
    }

    fn assert_close(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-4,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn gravity_pulls_toward_center() {
        let mut nodes = vec![node("a", 0.0, 100.0)];
        apply_center_gravity(&mut nodes, vec2(100.0, 100.0), 0.001);
        assert_close(nodes[0].velocity, vec2(0.1, 0.0));
    }

    #[test]
    fn repulsion_is_inverse_square_and_symmetric() {
        let mut nodes = vec![node("a", 0.0, 0.0), node("b", 10.0, 0.0)];
        apply_repulsion(&mut nodes, 1000.0);
        assert_close(nodes[0].velocity, vec2(-10.0, 0.0));
        assert_close(nodes[1].velocity, vec2(10.0, 0.0));
    }

    #[test]
    fn springs_pull_long_edges_together_and_push_short_ones_apart() {
        let mut nodes = vec![node("a", 0.0, 0.0), node("b", 200.0, 0.0)];
        apply_springs(&mut nodes, &[(0, 1)], 100.0, 0.01);
        assert_close(nodes[0].velocity, vec2(1.0, 0.0));
        assert_close(nodes[1].velocity, vec2(-1.0, 0.0));

        let mut nodes = vec![node("a", 0.0, 0.0), node("b", 50.0, 0.0)];
        apply_springs(&mut nodes, &[(0, 1)], 100.0, 0.01);
        assert_close(nodes[0].velocity, vec2(-0.5, 0.0));
        assert_close(nodes[1].velocity, vec2(0.5, 0.0));
    }

    #[test]
    fn duplicate_links_add_up() {
        let mut nodes = vec![node("a", 0.0, 0.0), node("b", 200.0, 0.0)];
        apply_springs(&mut nodes, &[(0, 1), (0, 1)], 100.0, 0.01);
        assert_close(nodes[0].velocity, vec2(2.0, 0.0));
    }

    #[test]
    fn self_loop_and_coincident_pairs_exchange_no_force() {
        let mut nodes = vec![node("a", 5.0, 5.0), node("b", 5.0, 5.0)];
        apply_repulsion(&mut nodes, 1000.0);
        apply_springs(&mut nodes, &[(0, 0), (0, 1), (7, 0)], 100.0, 0.01);
        assert_close(nodes[0].velocity, Vec2::ZERO);
        assert_close(nodes[1].velocity, Vec2::ZERO);
    }

    #[test]
    fn integrate_damps_moves_and_clamps() {
        let mut nodes = vec![node("a", 100.0, 100.0), node("b", 440.0, 100.0)];
        nodes[0].velocity = vec2(10.0, -10.0);
        nodes[1].velocity = vec2(100.0, 0.0);
        integrate(&mut nodes, vec2(500.0, 500.0), 0.9, 50.0);

        assert_close(nodes[0].velocity, vec2(9.0, -9.0));
        assert_close(nodes[0].pos, vec2(109.0, 91.0));
        assert_close(nodes[1].pos, vec2(450.0, 100.0));
    }
}

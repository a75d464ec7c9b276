use eframe::egui::{CursorIcon, Pos2};

use super::super::physics::{SimNode, Simulation};

/// First node in array order whose squared distance to `pointer` is below
/// `radius_sq`. Overlapping nodes resolve to the earliest index, not the
/// nearest one.
pub(in crate::app) fn first_node_within(
    nodes: &[SimNode],
    pointer: Pos2,
    radius_sq: f32,
) -> Option<&SimNode> {
    nodes
        .iter()
        .find(|node| (node.pos - pointer.to_vec2()).length_sq() < radius_sq)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) struct HoverUpdate {
    pub changed: bool,
    pub cursor: CursorIcon,
}

#[derive(Clone, Debug, Default)]
pub(in crate::app) struct Interaction {
    hovered: Option<String>,
}

impl Interaction {
    pub(in crate::app) fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub(in crate::app) fn pointer_moved(
        &mut self,
        simulation: &Simulation,
        pointer: Pos2,
    ) -> HoverUpdate {
        let found = simulation.find_node_at(pointer).map(|node| node.id.as_str());
        let changed = self.hovered.as_deref() != found;
        if changed {
            self.hovered = found.map(str::to_owned);
        }

        HoverUpdate {
            changed,
            cursor: if self.hovered.is_some() {
                CursorIcon::PointingHand
            } else {
                CursorIcon::Default
            },
        }
    }

    pub(in crate::app) fn pointer_left(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    /// Calls `navigate` once with the id of the node under `pointer`. Returns
    /// whether anything was hit.
    pub(in crate::app) fn clicked<F: FnOnce(&str)>(
        &self,
        simulation: &Simulation,
        pointer: Pos2,
        navigate: F,
    ) -> bool {
        match simulation.find_node_at(pointer) {
            Some(node) => {
                navigate(&node.id);
                true
            }
            None => false,
        }
    }

    pub(in crate::app) fn status_text(&self) -> String {
        match &self.hovered {
            Some(id) => format!("Hovering {id}. Click to open."),
            None => "No document under the pointer.".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::physics::PhysicsConfig;
    use crate::app::testing::{graph, simulation_at};
    use eframe::egui::pos2;

    #[test]
    fn finds_node_within_threshold_only() {
        let simulation = simulation_at(&[("a", 100.0, 100.0)]);
        assert_eq!(
            simulation
                .find_node_at(pos2(105.0, 100.0))
                .map(|node| node.id.as_str()),
            Some("a")
        );
        assert!(simulation.find_node_at(pos2(200.0, 200.0)).is_none());
        assert!(simulation.find_node_at(pos2(110.0, 100.0)).is_none());
    }

    #[test]
    fn overlapping_nodes_resolve_to_the_earliest() {
        let simulation = simulation_at(&[("first", 100.0, 100.0), ("second", 100.0, 100.0)]);
        let hit = simulation.find_node_at(pos2(100.0, 100.0)).unwrap();
        assert_eq!(hit.id, "first");
    }

    #[test]
    fn first_match_beats_nearest_match() {
        let simulation = simulation_at(&[("far", 108.0, 100.0), ("near", 101.0, 100.0)]);
        let hit = simulation.find_node_at(pos2(100.0, 100.0)).unwrap();
        assert_eq!(hit.id, "far");
    }

    #[test]
    fn empty_simulation_hits_nothing() {
        let mut simulation = Simulation::new(PhysicsConfig::default());
        simulation.sync(&graph(&[], &[]), eframe::egui::vec2(500.0, 500.0));
        assert!(simulation.find_node_at(pos2(250.0, 250.0)).is_none());
    }

    #[test]
    fn hover_tracks_pointer_and_cursor() {
        let simulation = simulation_at(&[("notes/a", 100.0, 100.0)]);
        let mut interaction = Interaction::default();

        let update = interaction.pointer_moved(&simulation, pos2(102.0, 99.0));
        assert_eq!(
            update,
            HoverUpdate {
                changed: true,
                cursor: CursorIcon::PointingHand
            }
        );
        assert_eq!(interaction.hovered(), Some("notes/a"));
        assert!(interaction.status_text().contains("notes/a"));

        let update = interaction.pointer_moved(&simulation, pos2(101.0, 100.0));
        assert!(!update.changed);

        let update = interaction.pointer_moved(&simulation, pos2(300.0, 300.0));
        assert_eq!(
            update,
            HoverUpdate {
                changed: true,
                cursor: CursorIcon::Default
            }
        );
        assert_eq!(interaction.hovered(), None);
    }

    #[test]
    fn pointer_leaving_clears_hover() {
        let simulation = simulation_at(&[("a", 100.0, 100.0)]);
        let mut interaction = Interaction::default();
        interaction.pointer_moved(&simulation, pos2(100.0, 100.0));
        assert!(interaction.pointer_left());
        assert!(!interaction.pointer_left());
    }

    #[test]
    fn click_navigates_once_on_hit_and_not_on_empty_space() {
        let simulation = simulation_at(&[("journal/day-1", 100.0, 100.0)]);
        let interaction = Interaction::default();

        let mut visited = Vec::new();
        assert!(interaction.clicked(&simulation, pos2(100.0, 104.0), |id| {
            visited.push(id.to_owned())
        }));
        assert!(!interaction.clicked(&simulation, pos2(10.0, 10.0), |id| {
            visited.push(id.to_owned())
        }));
        assert_eq!(visited, vec!["journal/day-1".to_owned()]);
    }
}

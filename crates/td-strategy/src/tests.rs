#[cfg(test)]
mod tests {
    use glam::IVec2;
    use td_core::geometry::Rect;

    use crate::lanes::*;
    use crate::planner::*;

    fn tower(id: u64, x: i32, y: i32, health: i32, level: u32) -> TowerInfo {
        TowerInfo {
            id,
            health,
            max_health: 20,
            level,
            rect: Rect::centered_on(IVec2::new(x, y), IVec2::splat(48)),
        }
    }

    fn creep_at(x: i32, y: i32) -> CreepInfo {
        CreepInfo {
            rect: Rect::from_origin_size(IVec2::new(x, y), IVec2::splat(32)),
        }
    }

    fn ctx(money: i64, towers: Vec<TowerInfo>, creeps: Vec<CreepInfo>) -> StrategyContext {
        StrategyContext {
            board_width: 600,
            board_height: 800,
            money,
            max_tower_level: 8,
            towers,
            creeps,
        }
    }

    /// Fill the front row so upgrades unlock.
    fn full_row() -> Vec<TowerInfo> {
        lane_centers(600)
            .into_iter()
            .enumerate()
            .map(|(i, x)| tower(i as u64 + 1, x, 400, 20, 1))
            .collect()
    }

    // ---- Lanes ----

    #[test]
    fn test_lanes_default_board() {
        assert_eq!(towers_per_row(600), 7);
        assert_eq!(lane_centers(600), vec![24, 116, 208, 300, 392, 484, 576]);
    }

    #[test]
    fn test_lanes_narrow_board_has_one() {
        assert_eq!(towers_per_row(10), 1);
        assert_eq!(lane_centers(10), vec![24]);
    }

    #[test]
    fn test_find_lane_first_within_tower_width() {
        let lanes = lane_centers(600);
        assert_eq!(find_lane(&lanes, 70), Some(24), "equidistant picks the first lane");
        assert_eq!(find_lane(&lanes, 100), Some(116));
        assert_eq!(find_lane(&lanes, 24 + 48), Some(116), "boundary is exclusive");
    }

    #[test]
    fn test_slot_occupancy() {
        let towers = vec![tower(1, 116, 400, 20, 1).rect];
        assert!(is_occupied(&towers, 116, 400));
        assert!(!is_occupied(&towers, 208, 400));
    }

    // ---- Planner ----

    #[test]
    fn test_plan_places_under_creep() {
        let plan = plan(&ctx(500, vec![], vec![creep_at(200, 40)]));
        assert_eq!(plan.first(), Some(&StrategyAction::PlaceTower { x: 208, y: 400 }));
    }

    #[test]
    fn test_plan_skips_occupied_lane() {
        let towers = vec![tower(1, 208, 400, 20, 1)];
        let plan = plan(&ctx(500, towers, vec![creep_at(200, 40)]));
        assert!(
            !plan.contains(&StrategyAction::PlaceTower { x: 208, y: 400 }),
            "lane already has a tower: {plan:?}"
        );
    }

    #[test]
    fn test_plan_heals_before_row_is_full() {
        let towers = vec![tower(1, 24, 400, 20, 1), tower(2, 116, 400, 3, 2)];
        let plan = plan(&ctx(500, towers, vec![]));
        assert_eq!(plan.first(), Some(&StrategyAction::Heal { tower: 2 }));
        assert!(
            !plan.iter().any(|a| matches!(a, StrategyAction::Upgrade { .. })),
            "no upgrades while the first row is incomplete"
        );
    }

    #[test]
    fn test_plan_upgrades_damaged_lowest_level_tower() {
        let mut towers = full_row();
        for t in towers.iter_mut().skip(1) {
            t.level = 3;
        }
        towers[0].health = 2;
        let plan = plan(&ctx(200, towers, vec![]));
        assert_eq!(plan[0], StrategyAction::Upgrade { tower: 1 });
        assert_eq!(plan[1], StrategyAction::Heal { tower: 1 });
    }

    #[test]
    fn test_plan_heals_damaged_tower_at_max_level() {
        let mut towers = full_row();
        towers[3].health = 1;
        towers[3].level = 8;
        let plan = plan(&ctx(100, towers, vec![]));
        assert_eq!(plan[0], StrategyAction::Heal { tower: 4 });
        assert_eq!(plan[1], StrategyAction::Upgrade { tower: 1 });
    }

    #[test]
    fn test_plan_upgrades_lowest_level_when_healthy() {
        let mut towers = full_row();
        towers[0].level = 2;
        let plan = plan(&ctx(100, towers, vec![]));
        assert_eq!(plan, vec![StrategyAction::Upgrade { tower: 2 }]);
    }

    #[test]
    fn test_plan_opens_second_row_when_rich() {
        let plan = plan(&ctx(1000, full_row(), vec![]));
        assert_eq!(plan[0], StrategyAction::Upgrade { tower: 1 });
        assert_eq!(plan[1], StrategyAction::PlaceTower { x: 24, y: 448 });
        assert_eq!(plan.len(), 8);
    }

    #[test]
    fn test_plan_empty_board_does_nothing() {
        assert!(plan(&ctx(500, vec![], vec![])).is_empty());
    }

    #[test]
    fn test_lowest_health_ties_go_to_last() {
        let towers = vec![tower(1, 24, 400, 2, 1), tower(2, 116, 400, 2, 1)];
        assert_eq!(lowest_health_tower(&towers).map(|t| t.id), Some(2));
        assert_eq!(lowest_level_tower(&towers).map(|t| t.id), Some(1));
    }
}

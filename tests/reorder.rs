#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use tasknest::libs::error::ReorderError;
    use tasknest::libs::reorder::{
        move_to_position, reorder_items, reorder_tasks, DragEvent, DragOutcome, DragSession, Positioned,
    };
    use tasknest::libs::task::Task;

    fn tasks(ids: &[i32]) -> Vec<Task> {
        ids.iter()
            .enumerate()
            .map(|(index, id)| {
                let mut task = Task::new(&format!("task {}", id), "", None);
                task.id = Some(*id);
                task.order = index as i32;
                task
            })
            .collect()
    }

    fn ids(tasks: &[Task]) -> Vec<i32> {
        tasks.iter().filter_map(|t| t.id).collect()
    }

    fn orders(tasks: &[Task]) -> Vec<i32> {
        tasks.iter().map(|t| t.order()).collect()
    }

    #[test]
    fn test_move_down_shifts_items_up() {
        let reordered = reorder_tasks(&tasks(&[1, 2, 3, 4]), 1, 3).unwrap();
        assert_eq!(ids(&reordered), vec![2, 3, 1, 4]);
        assert_eq!(orders(&reordered), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_move_up_shifts_items_down() {
        let reordered = reorder_tasks(&tasks(&[1, 2, 3, 4]), 4, 1).unwrap();
        assert_eq!(ids(&reordered), vec![4, 1, 2, 3]);
        assert_eq!(orders(&reordered), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_drop_on_next_neighbour_swaps() {
        let reordered = reorder_tasks(&tasks(&[10, 11, 12]), 10, 11).unwrap();
        let pairs: Vec<(i32, i32)> = reordered.iter().map(|t| (t.id.unwrap(), t.order())).collect();
        assert_eq!(pairs, vec![(11, 0), (10, 1), (12, 2)]);
    }

    #[test]
    fn test_drop_on_self_only_renumbers() {
        let mut gappy = tasks(&[1, 2, 3]);
        gappy[1].order = 7;
        gappy[2].order = 9;
        let reordered = reorder_items(&gappy, 2, 2).unwrap();
        assert_eq!(ids(&reordered), vec![1, 2, 3]);
        assert_eq!(orders(&reordered), vec![0, 1, 2]);
    }

    #[test]
    fn test_unknown_ids() {
        let list = tasks(&[1, 2]);
        assert_eq!(reorder_items(&list, 9, 1).unwrap_err(), ReorderError::UnknownTask(9));
        assert_eq!(reorder_items(&list, 1, 8).unwrap_err(), ReorderError::UnknownTask(8));
    }

    #[test]
    fn test_move_to_position_clamps() {
        let list = tasks(&[1, 2, 3]);
        assert_eq!(ids(&move_to_position(&list, 1, 99).unwrap()), vec![2, 3, 1]);
        assert_eq!(ids(&move_to_position(&list, 3, 0).unwrap()), vec![3, 1, 2]);
        assert!(move_to_position(&Vec::<Task>::new(), 1, 0).is_err());
    }

    #[test]
    fn test_drag_gesture_calls_on_reorder_once() {
        let calls = RefCell::new(Vec::new());
        let mut session = DragSession::new(tasks(&[1, 2, 3]), |reordered: &[Task]| {
            calls.borrow_mut().push(ids(reordered));
        });

        assert_eq!(
            session.handle(DragEvent::Start(3)).unwrap(),
            DragOutcome::Dragging { indicator: None }
        );
        assert_eq!(session.dragging(), Some(3));
        session.handle(DragEvent::Move).unwrap();
        assert_eq!(
            session.handle(DragEvent::Over(1)).unwrap(),
            DragOutcome::Dragging { indicator: Some(1) }
        );

        match session.handle(DragEvent::Up).unwrap() {
            DragOutcome::Dropped(reordered) => assert_eq!(ids(&reordered), vec![3, 1, 2]),
            other => panic!("expected drop, got {:?}", other),
        }
        assert_eq!(ids(session.items()), vec![3, 1, 2]);
        assert_eq!(session.dragging(), None);
        drop(session);

        assert_eq!(calls.into_inner(), vec![vec![3, 1, 2]]);
    }

    #[test]
    fn test_hovering_self_shows_no_indicator() {
        let mut session = DragSession::new(tasks(&[1, 2]), |_: &[Task]| panic!("must not persist"));
        session.handle(DragEvent::Start(1)).unwrap();
        session.handle(DragEvent::Over(1)).unwrap();
        assert_eq!(session.drop_indicator(), None);
        assert_eq!(session.handle(DragEvent::Up).unwrap(), DragOutcome::Cancelled);
    }

    #[test]
    fn test_leave_before_release_cancels() {
        let mut session = DragSession::new(tasks(&[1, 2]), |_: &[Task]| panic!("must not persist"));
        session.handle(DragEvent::Start(1)).unwrap();
        session.handle(DragEvent::Over(2)).unwrap();
        session.handle(DragEvent::Leave).unwrap();
        assert_eq!(session.handle(DragEvent::Up).unwrap(), DragOutcome::Cancelled);
        assert_eq!(ids(session.items()), vec![1, 2]);
    }

    #[test]
    fn test_events_without_drag_are_idle() {
        let mut session = DragSession::new(tasks(&[1, 2]), |_: &[Task]| panic!("must not persist"));
        assert_eq!(session.handle(DragEvent::Over(2)).unwrap(), DragOutcome::Idle);
        assert_eq!(session.handle(DragEvent::Up).unwrap(), DragOutcome::Idle);
    }

    #[test]
    fn test_drag_refused_while_loading() {
        let mut session = DragSession::new(tasks(&[1, 2]), |_: &[Task]| panic!("must not persist"));
        session.set_loading(true);
        assert!(session.is_loading());
        assert_eq!(session.handle(DragEvent::Start(1)).unwrap_err(), ReorderError::Loading);

        session.set_loading(false);
        assert!(session.handle(DragEvent::Start(1)).is_ok());
    }

    #[test]
    fn test_drag_in_progress_can_drop_while_loading() {
        let calls = RefCell::new(0);
        let mut session = DragSession::new(tasks(&[1, 2, 3]), |_: &[Task]| *calls.borrow_mut() += 1);
        session.handle(DragEvent::Start(1)).unwrap();
        session.handle(DragEvent::Over(2)).unwrap();

        session.set_loading(true);
        match session.handle(DragEvent::Up).unwrap() {
            DragOutcome::Dropped(reordered) => assert_eq!(ids(&reordered), vec![2, 1, 3]),
            other => panic!("expected drop, got {:?}", other),
        }
        assert_eq!(session.handle(DragEvent::Start(2)).unwrap_err(), ReorderError::Loading);
        assert_eq!(session.dragging(), None);

        session.set_loading(false);
        assert!(session.handle(DragEvent::Start(2)).is_ok());
        drop(session);
        assert_eq!(calls.into_inner(), 1);
    }

    #[test]
    fn test_start_on_unknown_row() {
        let mut session = DragSession::new(tasks(&[1]), |_: &[Task]| {});
        assert_eq!(session.handle(DragEvent::Start(5)).unwrap_err(), ReorderError::UnknownTask(5));
    }
}

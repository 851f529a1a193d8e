use emogo_engine::{Color, Emotion};
use emogo_node::{Frame, Phase, TileAction};

use crate::common::{controller, emotion_at, is_state_update, place_all, tile_frame};

#[test]
fn black_moves_first_and_players_alternate() {
    let (mut game, _bus) = controller(5, 5);
    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.phase(), Phase::Playing);

    place_all(&mut game, &[(3, 3)]);
    assert_eq!(game.board().color_at((3, 3)), Some(Color::Black));
    assert_eq!(game.current_player(), Color::White);

    place_all(&mut game, &[(2, 2)]);
    assert_eq!(game.board().color_at((2, 2)), Some(Color::White));
    assert_eq!(game.current_player(), Color::Black);
}

#[test]
fn placement_broadcasts_every_stone() {
    let (mut game, bus) = controller(5, 5);
    place_all(&mut game, &[(1, 2)]);
    bus.clear();

    place_all(&mut game, &[(4, 5)]);

    let frames = bus.frames();
    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(is_state_update));
    assert_eq!(frames[0].id(), 0x412);
    assert_eq!(frames[0].data(), &[0x01, 0x01, 0x02, 0x00, 0x5A]);
    assert_eq!(frames[1].id(), 0x445);
    assert_eq!(frames[1].data(), &[0x01, 0x02, 0x02, 0x00, 0x5A]);
}

#[test]
fn surrounded_stone_dies_and_gates_play() {
    let (mut game, _bus) = controller(5, 5);
    place_all(
        &mut game,
        &[
            (3, 3),
            (2, 3),
            (1, 1),
            (3, 2),
            (5, 5),
            (3, 4),
            (1, 5),
            (4, 3),
        ],
    );

    assert_eq!(emotion_at(&game, (3, 3)), Emotion::Dead);
    for point in [(2, 3), (3, 2), (3, 4), (4, 3)] {
        assert_eq!(emotion_at(&game, point), Emotion::Normal);
    }
    assert_eq!(game.phase(), Phase::AwaitingRemoval);
    assert_eq!(game.dead_stones(), &[(3, 3)]);
    // The capturing player keeps the turn until the dead stone is lifted.
    assert_eq!(game.current_player(), Color::White);
}

#[test]
fn occupied_cell_is_a_no_op() {
    let (mut game, bus) = controller(5, 5);
    place_all(&mut game, &[(2, 2)]);
    bus.clear();

    place_all(&mut game, &[(2, 2)]);

    assert!(bus.frames().is_empty());
    assert_eq!(game.current_player(), Color::White);
    assert_eq!(game.board().color_at((2, 2)), Some(Color::Black));
}

#[test]
fn out_of_bounds_is_a_no_op() {
    let (mut game, bus) = controller(5, 5);
    game.handle_frame(&tile_frame((6, 1), TileAction::Placed));
    game.handle_frame(&tile_frame((0, 3), TileAction::Placed));

    assert!(bus.frames().is_empty());
    assert!(game.board().is_empty());
    assert_eq!(game.current_player(), Color::Black);
}

#[test]
fn unrecognized_frames_are_discarded() {
    let (mut game, bus) = controller(5, 5);
    game.handle_frame(&Frame::new(0x123, &[0x01]).unwrap());
    game.handle_frame(&Frame::new(0x633, &[0x09]).unwrap());
    game.handle_frame(&Frame::new(0x633, &[]).unwrap());

    assert!(bus.frames().is_empty());
    assert!(game.board().is_empty());
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn placement_resets_consecutive_passes() {
    let (mut game, _bus) = controller(5, 5);
    assert!(game.pass());
    assert_eq!(game.consecutive_passes(), 1);

    place_all(&mut game, &[(1, 1)]);
    assert_eq!(game.consecutive_passes(), 0);
    assert_eq!(game.current_player(), Color::Black);
}

#[test]
fn placement_after_game_over_is_ignored() {
    let (mut game, bus) = controller(5, 5);
    game.pass();
    game.pass();
    assert!(game.is_game_over());

    place_all(&mut game, &[(3, 3)]);

    assert!(game.board().is_empty());
    assert!(bus.frames().is_empty());
}

#[test]
fn transport_failure_is_swallowed() {
    let (mut game, bus) = controller(5, 5);
    bus.set_failing(true);

    place_all(&mut game, &[(3, 3)]);

    assert!(bus.frames().is_empty());
    assert_eq!(game.board().color_at((3, 3)), Some(Color::Black));
    assert_eq!(game.current_player(), Color::White);
}

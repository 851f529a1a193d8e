use emogo_engine::{Color, Outcome, StoneCounts};
use emogo_node::{Flow, Phase};

use crate::common::{controller, place_all};

#[test]
fn single_pass_switches_player() {
    let (mut game, _bus) = controller(5, 5);
    assert!(game.pass());
    assert_eq!(game.current_player(), Color::White);
    assert_eq!(game.consecutive_passes(), 1);
    assert!(!game.is_game_over());
}

#[test]
fn consecutive_passes_end_the_game() {
    let (mut game, _bus) = controller(5, 5);
    assert_eq!(game.handle_input("pass"), Flow::Continue);
    assert_eq!(game.handle_input("pass"), Flow::Continue);

    assert!(game.is_game_over());
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(
        game.final_score(),
        Some((StoneCounts { black: 0, white: 0 }, Outcome::Tie))
    );
}

#[test]
fn final_score_counts_live_stones() {
    let (mut game, _bus) = controller(5, 5);
    place_all(&mut game, &[(1, 1), (5, 5), (3, 3)]);
    game.pass();
    game.pass();

    assert_eq!(
        game.final_score(),
        Some((StoneCounts { black: 2, white: 1 }, Outcome::BlackWins))
    );
}

#[test]
fn pass_after_game_over_is_rejected() {
    let (mut game, _bus) = controller(5, 5);
    game.pass();
    game.pass();
    let player = game.current_player();

    assert!(!game.pass());
    assert_eq!(game.current_player(), player);
}

#[test]
fn commands_are_case_insensitive() {
    let (mut game, _bus) = controller(5, 5);
    game.handle_input("PASS");
    game.handle_input(" Pass \n");
    assert!(game.is_game_over());
}

#[test]
fn unknown_command_changes_nothing() {
    let (mut game, bus) = controller(5, 5);
    assert_eq!(game.handle_input("resign"), Flow::Continue);
    assert_eq!(game.handle_input(""), Flow::Continue);

    assert_eq!(game.current_player(), Color::Black);
    assert_eq!(game.consecutive_passes(), 0);
    assert_eq!(game.phase(), Phase::Playing);
    assert!(bus.frames().is_empty());
}

#[test]
fn quit_ends_the_game() {
    let (mut game, _bus) = controller(5, 5);
    assert_eq!(game.handle_input("quit"), Flow::Quit);
    assert!(game.is_game_over());
    assert_eq!(game.final_score(), None);
}

use std::time::Duration;

use emogo_node::protocol::ACTION_HIGHLIGHT;
use emogo_node::{Frame, TileAction};

use crate::common::{
    controller, controller_with_blink, is_broadcast, is_state_update, place_all, tile_frame,
};

#[tokio::test]
async fn lone_stone_tap_highlights_and_blinks() {
    let (mut game, bus) = controller(5, 5);
    place_all(&mut game, &[(2, 4)]);
    bus.clear();

    let blink = game
        .handle_frame(&tile_frame((2, 4), TileAction::Tapped))
        .expect("tap on a stone starts a blink");
    blink.await.unwrap();

    let frames = bus.frames();
    assert_eq!(frames.len(), 8);
    assert_eq!(frames[0], Frame::highlight((2, 4), true));
    for pair in frames[1..7].chunks(2) {
        assert_eq!(pair[0], Frame::broadcast_blink(true));
        assert_eq!(pair[1], Frame::broadcast_blink(false));
    }
    assert_eq!(frames[7], Frame::highlight((2, 4), false));

    // Nothing addressed to any other tile.
    assert!(
        frames
            .iter()
            .all(|f| is_broadcast(f) || f.id() == Frame::tile_id((2, 4)))
    );
}

#[tokio::test]
async fn group_tap_reaches_every_member() {
    let (mut game, bus) = controller(5, 5);
    // Black (1,1)-(1,2)-(2,2) chain, white elsewhere.
    place_all(&mut game, &[(1, 1), (5, 5), (1, 2), (5, 4), (2, 2)]);
    bus.clear();

    let blink = game.handle_tapped((1, 2)).unwrap();
    blink.await.unwrap();

    let frames = bus.frames();
    let mut on: Vec<u16> = frames
        .iter()
        .filter(|f| f.data() == [ACTION_HIGHLIGHT, 0xFF])
        .map(Frame::id)
        .collect();
    on.sort();
    assert_eq!(on, vec![0x411, 0x412, 0x422]);

    let off = frames
        .iter()
        .filter(|f| f.data() == [ACTION_HIGHLIGHT, 0x00])
        .count();
    assert_eq!(off, 3);
    assert_eq!(frames.iter().filter(|f| is_broadcast(f)).count(), 6);
}

#[tokio::test]
async fn tap_includes_dead_members() {
    let (mut game, bus) = controller(3, 3);
    place_all(&mut game, &[(1, 1), (1, 2), (3, 3), (2, 1)]);
    bus.clear();

    let blink = game.handle_tapped((1, 1)).unwrap();
    blink.await.unwrap();

    assert_eq!(bus.frames()[0], Frame::highlight((1, 1), true));
    assert_eq!(bus.frames().len(), 8);
}

#[tokio::test]
async fn empty_cell_tap_sends_nothing() {
    let (mut game, bus) = controller(5, 5);
    assert!(game.handle_tapped((3, 3)).is_none());
    assert!(game
        .handle_frame(&tile_frame((7, 7), TileAction::Tapped))
        .is_none());
    assert!(bus.frames().is_empty());
}

#[tokio::test]
async fn blink_does_not_block_dispatch() {
    let (mut game, bus) = controller_with_blink(5, 5, Duration::from_millis(50));
    place_all(&mut game, &[(3, 3)]);
    bus.clear();

    let blink = game.handle_tapped((3, 3)).unwrap();
    place_all(&mut game, &[(1, 1)]);

    let frames = bus.frames();
    assert_eq!(frames[0], Frame::highlight((3, 3), true));
    assert_eq!(frames.len(), 3);
    assert!(frames[1..].iter().all(is_state_update));

    blink.await.unwrap();
    assert_eq!(bus.frames().len(), 10);
}

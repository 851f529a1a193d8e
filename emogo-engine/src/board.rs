use arrayvec::ArrayVec;
use serde::Serialize;
use std::fmt;

use crate::Point;
use crate::error::BoardError;
use crate::stone::{Color, Direction, Emotion, Stone};

/// Snapshot of one occupied cell, as broadcast to the tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoneState {
    pub x: u8,
    pub y: u8,
    pub color: Color,
    pub emotion: Emotion,
    pub direction: Direction,
}

impl StoneState {
    pub fn point(&self) -> Point {
        (self.x, self.y)
    }
}

/// Live (non-dead) stones per color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoneCounts {
    pub black: u32,
    pub white: u32,
}

impl StoneCounts {
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Outcome::BlackWins,
            std::cmp::Ordering::Less => Outcome::WhiteWins,
            std::cmp::Ordering::Equal => Outcome::Tie,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::BlackWins => write!(f, "Black wins"),
            Outcome::WhiteWins => write!(f, "White wins"),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

/// The board stored as a flat row-major array of optional stones.
///
/// Public coordinates are 1-indexed `(x, y)` with `x` selecting the row.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: Vec<Option<Stone>>,
    rows: u8,
    cols: u8,
    connect: Vec<Vec<Point>>,
}

impl Board {
    /// Create an empty board with `rows` x `cols` cells.
    pub fn new(rows: u8, cols: u8) -> Self {
        Board {
            cells: vec![None; rows as usize * cols as usize],
            rows,
            cols,
            connect: Vec::new(),
        }
    }

    // -- Accessors --

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Connectivity groups from the last full recomputation.
    pub fn connect(&self) -> &[Vec<Point>] {
        &self.connect
    }

    pub fn on_board(&self, (x, y): Point) -> bool {
        (1..=self.rows).contains(&x) && (1..=self.cols).contains(&y)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    pub fn stone(&self, point: Point) -> Result<Option<&Stone>, BoardError> {
        let i = self.index(point)?;
        Ok(self.cells[i].as_ref())
    }

    /// Color at `point`, `None` for empty or off-board cells.
    pub fn color_at(&self, point: Point) -> Option<Color> {
        self.stone(point).ok().flatten().map(Stone::color)
    }

    pub fn stone_state(&self, point: Point) -> Result<StoneState, BoardError> {
        let i = self.index(point)?;
        self.cells[i]
            .as_ref()
            .map(|stone| Self::snapshot(point, stone))
            .ok_or(BoardError::EmptyCell(point))
    }

    /// One record per occupied cell, in row-major order.
    pub fn board_state(&self) -> Vec<StoneState> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| {
                cell.as_ref()
                    .map(|stone| Self::snapshot(self.point_of(i), stone))
            })
            .collect()
    }

    pub fn stone_counts(&self) -> StoneCounts {
        let mut counts = StoneCounts::default();
        for stone in self.cells.iter().flatten().filter(|s| !s.is_dead()) {
            match stone.color() {
                Color::Black => counts.black += 1,
                Color::White => counts.white += 1,
            }
        }
        counts
    }

    /// Every stone currently marked dead, in row-major order.
    pub fn dead_stones(&self) -> Vec<Point> {
        self.board_state()
            .into_iter()
            .filter(|s| s.emotion.is_dead())
            .map(|s| s.point())
            .collect()
    }

    // -- Mutations --

    /// Place a new stone and rerun the liberty pass for `color`'s move.
    pub fn place_stone(&mut self, point: Point, color: Color) -> Result<(), BoardError> {
        let i = self.index(point)?;
        if self.cells[i].is_some() {
            return Err(BoardError::OccupiedCell(point));
        }

        self.cells[i] = Some(Stone::new(color));
        self.judge(color);
        Ok(())
    }

    /// Clear a cell. Liberties are not recomputed.
    pub fn remove_stone(&mut self, point: Point) -> Result<Stone, BoardError> {
        let i = self.index(point)?;
        self.cells[i].take().ok_or(BoardError::EmptyCell(point))
    }

    /// Override a stone's derived fields without running the liberty pass.
    pub fn set_stone_state(
        &mut self,
        point: Point,
        emotion: Option<Emotion>,
        direction: Option<Direction>,
    ) -> Result<(), BoardError> {
        let i = self.index(point)?;
        let stone = self.cells[i]
            .as_mut()
            .ok_or(BoardError::EmptyCell(point))?;
        if let Some(emotion) = emotion {
            stone.set_emotion(emotion);
        }
        if let Some(direction) = direction {
            stone.set_direction(direction);
        }
        Ok(())
    }

    // -- Graph algorithms --

    /// Every stone connected to `point` by same-colored neighbors, dead or alive.
    /// The origin comes first.
    pub fn connected(&self, point: Point) -> Result<Vec<Point>, BoardError> {
        let i = self.index(point)?;
        if self.cells[i].is_none() {
            return Err(BoardError::EmptyCell(point));
        }

        let mut visited = vec![false; self.cells.len()];
        let (group, _) = self.flood(i, &mut visited, true);
        Ok(group.into_iter().map(|g| self.point_of(g)).collect())
    }

    /// Distinct liberties of the connectivity group at `point`.
    pub fn liberties(&self, point: Point) -> Result<usize, BoardError> {
        let i = self.index(point)?;
        if self.cells[i].is_none() {
            return Err(BoardError::EmptyCell(point));
        }

        let mut visited = vec![false; self.cells.len()];
        let (_, liberties) = self.flood(i, &mut visited, true);
        Ok(liberties)
    }

    /// Rebuild `connect` and reclassify every group's emotion by its liberties.
    pub fn check_connect(&mut self) {
        self.connect.clear();
        let mut visited = vec![false; self.cells.len()];

        for i in 0..self.cells.len() {
            if visited[i] || self.cells[i].is_none() {
                continue;
            }
            let (group, liberties) = self.flood(i, &mut visited, true);
            let emotion = Emotion::from_liberties(liberties);
            for &g in &group {
                if let Some(stone) = self.cells[g].as_mut() {
                    stone.set_emotion(emotion);
                }
            }
            let points = group.into_iter().map(|g| self.point_of(g)).collect();
            self.connect.push(points);
        }
    }

    /// Mark the opponent's dead groups first, then the mover's, then reclassify.
    fn judge(&mut self, mover: Color) {
        for color in [mover.opp(), mover] {
            for i in self.find_dead_stones(color) {
                if let Some(stone) = self.cells[i].as_mut() {
                    stone.set_emotion(Emotion::Dead);
                }
            }
        }
        self.check_connect();
    }

    fn find_dead_stones(&self, color: Color) -> Vec<usize> {
        let mut visited = vec![false; self.cells.len()];
        let mut dead = Vec::new();

        for i in 0..self.cells.len() {
            if visited[i] || self.cells[i].map(|s| s.color()) != Some(color) {
                continue;
            }
            let (group, liberties) = self.flood(i, &mut visited, false);
            if liberties == 0 {
                dead.extend(group);
            }
        }

        dead
    }

    /// Flood-fill the same-colored group at `start`, counting distinct liberties.
    ///
    /// Empty neighbors and dead neighbors are liberties. With `include_dead`
    /// unset, dead stones of the group's own color are liberties rather than
    /// members.
    fn flood(
        &self,
        start: usize,
        visited: &mut [bool],
        include_dead: bool,
    ) -> (Vec<usize>, usize) {
        let Some(color) = self.cells[start].map(|s| s.color()) else {
            return (Vec::new(), 0);
        };

        let mut seen = vec![false; self.cells.len()];
        let mut liberties = 0;
        let mut group = Vec::new();
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(i) = stack.pop() {
            group.push(i);
            for n in self.neighbors(i) {
                match &self.cells[n] {
                    Some(s) if s.color() == color && (include_dead || !s.is_dead()) => {
                        if !visited[n] {
                            visited[n] = true;
                            stack.push(n);
                        }
                    }
                    Some(s) if !s.is_dead() => {}
                    _ => {
                        if !seen[n] {
                            seen[n] = true;
                            liberties += 1;
                        }
                    }
                }
            }
        }

        (group, liberties)
    }

    /// Orthogonal on-board neighbors of a flat index.
    fn neighbors(&self, i: usize) -> ArrayVec<usize, 4> {
        let cols = self.cols as usize;
        let (row, col) = (i / cols, i % cols);
        let mut result = ArrayVec::new();
        if row > 0 {
            result.push(i - cols);
        }
        if row + 1 < self.rows as usize {
            result.push(i + cols);
        }
        if col > 0 {
            result.push(i - 1);
        }
        if col + 1 < cols {
            result.push(i + 1);
        }
        result
    }

    // -- Internal helpers --

    fn index(&self, point: Point) -> Result<usize, BoardError> {
        if !self.on_board(point) {
            return Err(BoardError::OutOfBounds(point));
        }
        let (x, y) = point;
        Ok((x as usize - 1) * self.cols as usize + (y as usize - 1))
    }

    #[inline]
    fn point_of(&self, i: usize) -> Point {
        let cols = self.cols as usize;
        ((i / cols) as u8 + 1, (i % cols) as u8 + 1)
    }

    fn snapshot((x, y): Point, stone: &Stone) -> StoneState {
        StoneState {
            x,
            y,
            color: stone.color(),
            emotion: stone.emotion(),
            direction: stone.direction(),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols as usize) {
            let line: Vec<&str> = row
                .iter()
                .map(|cell| match cell {
                    None => ".",
                    Some(stone) => match (stone.emotion(), stone.color()) {
                        (Emotion::Dead, Color::Black) => "X",
                        (Emotion::Dead, Color::White) => "x",
                        (Emotion::Defensive, Color::Black) => "D",
                        (Emotion::Defensive, Color::White) => "d",
                        (Emotion::Offensive, Color::Black) => "O",
                        (Emotion::Offensive, Color::White) => "o",
                        (Emotion::Normal, Color::Black) => "○",
                        (Emotion::Normal, Color::White) => "●",
                    },
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

//! Board storage for Hex: a flat row-major tile array on a rhombus.

use super::action::HexError;
use super::types::{Coord, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// The six neighbor offsets `(d_row, d_col)` of a rhombus hex grid.
///
/// Rows are shifted half a cell per row, so the diagonal neighbors are
/// `(-1, +1)` and `(+1, -1)`; `(-1, -1)` and `(+1, +1)` are not adjacent.
pub const HEX_OFFSETS: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];

/// A validated board edge length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(try_from = "usize", into = "usize")]
pub struct BoardSize(usize);

impl BoardSize {
    /// Smallest supported board.
    pub const MIN: usize = 4;
    /// Largest supported board.
    pub const MAX: usize = 19;
    /// Size used when no valid size is supplied.
    pub const DEFAULT: BoardSize = BoardSize(11);

    /// Validates a requested size.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, HexError> {
        if (Self::MIN..=Self::MAX).contains(&size) {
            Ok(Self(size))
        } else {
            Err(HexError::InvalidConfiguration { size })
        }
    }

    /// The edge length.
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for BoardSize {
    type Error = HexError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<BoardSize> for usize {
    fn from(size: BoardSize) -> Self {
        size.0
    }
}

/// A single cell and its owner.
///
/// Tiles are only built by [`Board`], so they serialize but never
/// deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tile {
    coord: Coord,
    owner: Option<PlayerId>,
}

impl Tile {
    /// The cell address.
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// The owning player, if claimed.
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Returns true if nobody owns this tile.
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }
}

/// `size × size` Hex board.
///
/// Tiles live in row-major order, so lookup by coordinate is a single
/// index computation. Each board carries a generation number that grows
/// every time a session rebuilds its board.
///
/// A board is always `size × size` with each tile at its own index. It is
/// serialized for snapshots and never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: BoardSize,
    generation: u64,
    tiles: Vec<Tile>,
}

impl Board {
    /// Creates an empty board of the given size (generation 0).
    #[instrument]
    pub fn new(size: BoardSize) -> Self {
        Self::with_generation(size, 0)
    }

    /// Creates an empty board, validating the raw size first.
    #[instrument]
    pub fn initialize(size: usize) -> Result<Self, HexError> {
        Ok(Self::new(BoardSize::new(size)?))
    }

    /// Creates the empty board that replaces this one.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn next_generation(&self, size: BoardSize) -> Self {
        Self::with_generation(size, self.generation + 1)
    }

    fn with_generation(size: BoardSize, generation: u64) -> Self {
        let n = size.get();
        let tiles = (0..n * n)
            .map(|i| Tile {
                coord: Coord::new(i / n, i % n),
                owner: None,
            })
            .collect();
        debug!(size = n, generation, "Allocated board");
        Self {
            size,
            generation,
            tiles,
        }
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.size.get()
    }

    /// Validated edge length.
    pub fn board_size(&self) -> BoardSize {
        self.size
    }

    /// Generation counter of this board.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Returns true if `coord` lies on this board.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size() && coord.col < self.size()
    }

    fn index(&self, coord: Coord) -> usize {
        coord.row * self.size() + coord.col
    }

    /// Resolves signed input coordinates to a cell on this board.
    pub fn coord(&self, row: i64, col: i64) -> Result<Coord, HexError> {
        let n = self.size() as i64;
        if (0..n).contains(&row) && (0..n).contains(&col) {
            Ok(Coord::new(row as usize, col as usize))
        } else {
            Err(HexError::NotFound { row, col })
        }
    }

    /// Returns the tile at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`HexError::NotFound`] if the coordinates are off the board.
    pub fn get(&self, row: i64, col: i64) -> Result<&Tile, HexError> {
        let coord = self.coord(row, col)?;
        self.tile(coord).ok_or(HexError::NotFound { row, col })
    }

    /// Returns the tile at `coord`, if it is on the board.
    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        if self.contains(coord) {
            self.tiles.get(self.index(coord))
        } else {
            None
        }
    }

    /// Owner of the tile at `coord`.
    pub fn owner(&self, coord: Coord) -> Option<PlayerId> {
        self.tile(coord).and_then(Tile::owner)
    }

    /// In-bounds hex neighbors of `coord`.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + use<> {
        let n = self.size() as isize;
        let (row, col) = (coord.row as isize, coord.col as isize);
        HEX_OFFSETS.into_iter().filter_map(move |(dr, dc)| {
            let (r, c) = (row + dr, col + dc);
            if (0..n).contains(&r) && (0..n).contains(&c) {
                Some(Coord::new(r as usize, c as usize))
            } else {
                None
            }
        })
    }

    /// Returns true if the two cells share an edge.
    pub fn are_adjacent(&self, a: Coord, b: Coord) -> bool {
        self.neighbors(a).any(|n| n == b)
    }

    /// Gives `coord` to `player`.
    ///
    /// # Errors
    ///
    /// Returns [`HexError::IllegalMove`] if the cell is already owned and
    /// [`HexError::NotFound`] if it is off the board.
    #[instrument(skip(self))]
    pub fn assign(&mut self, coord: Coord, player: PlayerId) -> Result<(), HexError> {
        if !self.contains(coord) {
            return Err(HexError::NotFound {
                row: coord.row as i64,
                col: coord.col as i64,
            });
        }
        let index = self.index(coord);
        let tile = &mut self.tiles[index];
        if tile.owner.is_some() {
            return Err(HexError::IllegalMove(coord));
        }
        tile.owner = Some(player);
        Ok(())
    }

    /// Cells owned by `player`, in row-major order.
    pub fn owned_by(&self, player: PlayerId) -> impl Iterator<Item = Coord> + '_ {
        self.tiles
            .iter()
            .filter(move |t| t.owner == Some(player))
            .map(Tile::coord)
    }

    /// Unowned cells, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.tiles.iter().filter(|t| t.is_empty()).map(Tile::coord)
    }

    /// Returns true if every tile has an owner.
    pub fn is_full(&self) -> bool {
        self.tiles.iter().all(|t| !t.is_empty())
    }

    /// Number of owned tiles.
    pub fn claimed_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_empty()).count()
    }
}

impl fmt::Display for Board {
    /// Draws the rhombus, shifting each row right by half a cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.size();
        write!(f, "    ")?;
        for col in 0..n {
            write!(f, "{:<2}", col % 10)?;
        }
        writeln!(f)?;
        for row in 0..n {
            write!(f, "{:>2}  {}", row, " ".repeat(row))?;
            for col in 0..n {
                let symbol = match self.owner(Coord::new(row, col)) {
                    None => '.',
                    Some(PlayerId::First) => 'X',
                    Some(PlayerId::Second) => 'O',
                };
                write!(f, "{symbol} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

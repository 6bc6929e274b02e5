use itertools::Itertools;
use rusqlite::{params, Connection};

use crate::game::prelude::*;
use crate::search::abstract_move::{get_legal_abstract_moves, AbstractMove, PlacementSpec};
use crate::search::config::{EvaluationType, MIN_DEPTH_TO_PERSIST};
use crate::search::transposition::{TranspositionEntry, TranspositionTable};

/// Environment variable naming the SQLite database that persists exact
/// transposition evaluations between runs.
pub const TRANSPOSITION_CACHE_DSN: &str = "TRANSPOSITION_CACHE_DSN";

const QUERY_CREATE_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS moves (
    id INTEGER PRIMARY KEY,
    x INTEGER,
    y INTEGER,
    piece_type INTEGER,
    owner_id INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS transposition_cache (
    board_hash_key TEXT PRIMARY KEY,
    best_move_ids TEXT NOT NULL,
    score INTEGER NOT NULL,
    depth INTEGER NOT NULL,
    evaluation_type INTEGER NOT NULL
);
";

const QUERY_STORE_LEGAL_MOVES: &str =
    "INSERT INTO moves(x, y, piece_type, owner_id) VALUES (?1, ?2, ?3, ?4);";

const QUERY_PERSIST_TRANSPOSITION_CACHE: &str = "
INSERT INTO transposition_cache(board_hash_key, best_move_ids, score, depth, evaluation_type)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT(board_hash_key) DO UPDATE SET best_move_ids = excluded.best_move_ids,
score = excluded.score, depth = excluded.depth, evaluation_type = excluded.evaluation_type;
";

const QUERY_LOAD_TRANSPOSITION_CACHE: &str =
    "SELECT board_hash_key, best_move_ids, score, depth, evaluation_type FROM transposition_cache;";

/// A connection to the persistence backend. Cache rows reference moves
/// through a pre-built dictionary of every legal abstract placement, which
/// keeps them compact.
pub struct DatabaseConnection {
    connection: Connection,
    moves: HashMap<i64, AbstractMove>,
}

impl DatabaseConnection {
    /// Opens the backend named by `TRANSPOSITION_CACHE_DSN`.
    pub fn open() -> Result<DatabaseConnection> {
        let dsn = std::env::var(TRANSPOSITION_CACHE_DSN)
            .map_err(|_| anyhow!("{TRANSPOSITION_CACHE_DSN} is not configured"))?;
        DatabaseConnection::open_at(&dsn)
    }

    /// Opens the backend at an explicit path.
    pub fn open_at(dsn: &str) -> Result<DatabaseConnection> {
        let connection = Connection::open(dsn)
            .with_context(|| format!("could not open transposition store at {dsn}"))?;
        connection.execute_batch(QUERY_CREATE_SCHEMA)?;
        populate_moves_table(&connection)?;
        let moves = load_moves_dictionary(&connection)?;
        Ok(DatabaseConnection { connection, moves })
    }

    /// The move dictionary: persisted id to abstract move.
    pub fn moves(&self) -> &HashMap<i64, AbstractMove> {
        &self.moves
    }
}

/// Fills the moves table on first use: every placement of both players plus
/// the two empty moves.
fn populate_moves_table(connection: &Connection) -> Result<()> {
    let count: i64 = connection.query_row("SELECT COUNT(*) FROM moves;", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(());
    }

    let game = Game::new();
    let mut moves = get_legal_abstract_moves(&game.board, PlayerId::One, false);
    moves.extend(get_legal_abstract_moves(&game.board, PlayerId::Two, false));
    moves.push(AbstractMove::empty(PlayerId::One));
    moves.push(AbstractMove::empty(PlayerId::Two));

    let mut statement = connection.prepare(QUERY_STORE_LEGAL_MOVES)?;
    for mv in moves {
        let (x, y, piece_type) = match mv.placement {
            Some(spec) => (
                Some(spec.x as i64),
                Some(spec.y as i64),
                Some(spec.piece_type.value() as i64),
            ),
            None => (None, None, None),
        };
        statement.execute(params![x, y, piece_type, mv.owner as i64])?;
    }
    Ok(())
}

fn load_moves_dictionary(connection: &Connection) -> Result<HashMap<i64, AbstractMove>> {
    let mut statement = connection.prepare("SELECT id, x, y, piece_type, owner_id FROM moves;")?;
    let rows = statement.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, Option<i64>>(1)?,
            row.get::<_, Option<i64>>(2)?,
            row.get::<_, Option<i64>>(3)?,
            row.get::<_, i64>(4)?,
        ))
    })?;

    let mut moves = HashMap::new();
    for row in rows {
        let (id, x, y, piece_type, owner_id) = row?;
        let owner = PlayerId::from_value(owner_id as u8)?;
        let mv = match (x, y, piece_type) {
            (Some(x), Some(y), Some(kind)) => AbstractMove {
                owner,
                placement: Some(PlacementSpec {
                    piece_type: PieceType::from_value(kind as u8)?,
                    x: x as i8,
                    y: y as i8,
                }),
            },
            _ => AbstractMove::empty(owner),
        };
        moves.insert(id, mv);
    }
    Ok(moves)
}

fn move_ids_by_properties(moves: &HashMap<i64, AbstractMove>) -> HashMap<AbstractMove, i64> {
    moves.iter().map(|(&id, &mv)| (mv, id)).collect()
}

/// Writes exact deep evaluations out to the backend. Failures are warnings;
/// the in-memory table keeps the engine going.
pub fn persist_transposition_cache(table: &TranspositionTable) {
    log::info!("Persisting transposition cache with {} entries.", table.len());
    let persisted = DatabaseConnection::open().and_then(|db| persist_into(&db, table));
    if let Err(e) = persisted {
        log::warn!("Error while persisting transposition cache: {e}.");
    }
}

/// Upserts the persistable entries of `table` through an open connection.
/// Only exact evaluations of sufficient depth are stored.
pub fn persist_into(db: &DatabaseConnection, table: &TranspositionTable) -> Result<()> {
    let move_ids = move_ids_by_properties(&db.moves);
    let mut statement = db.connection.prepare(QUERY_PERSIST_TRANSPOSITION_CACHE)?;
    for (key, entry) in table.entries() {
        if entry.kind != EvaluationType::Exact || entry.depth < MIN_DEPTH_TO_PERSIST {
            continue;
        }
        let best_move_ids = entry
            .best_moves
            .iter()
            .map(|mv| {
                move_ids
                    .get(mv)
                    .copied()
                    .ok_or_else(|| anyhow!("move {mv} is missing from the moves table"))
            })
            .collect::<Result<Vec<i64>>>()?;
        let joined = best_move_ids.iter().map(|id| id.to_string()).join(",");
        statement.execute(params![
            key,
            joined,
            entry.score as i64,
            entry.depth as i64,
            entry.kind.value() as i64
        ])?;
    }
    Ok(())
}

/// Reads every persisted entry back through an open connection.
pub fn load_from(db: &DatabaseConnection) -> Result<HashMap<String, TranspositionEntry>> {
    let mut statement = db.connection.prepare(QUERY_LOAD_TRANSPOSITION_CACHE)?;
    let rows = statement.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, i64>(3)?,
            row.get::<_, i64>(4)?,
        ))
    })?;

    let mut result = HashMap::new();
    for row in rows {
        let (key, ids, score, depth, kind) = row?;
        let best_moves = ids
            .split(',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                let id = token
                    .parse::<i64>()
                    .map_err(|_| anyhow!("malformed move id {token}"))?;
                db.moves
                    .get(&id)
                    .copied()
                    .ok_or_else(|| anyhow!("unknown move id {id}"))
            })
            .collect::<Result<Vec<AbstractMove>>>()?;
        result.insert(
            key,
            TranspositionEntry {
                best_moves,
                score: score as i32,
                depth: depth as u8,
                kind: EvaluationType::from_value(kind as u8)?,
            },
        );
    }
    Ok(result)
}

fn load_transposition_cache_data() -> HashMap<String, TranspositionEntry> {
    match DatabaseConnection::open().and_then(|db| load_from(&db)) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("Error while loading transposition cache: {e}.");
            HashMap::new()
        }
    }
}

/// Hydrates the in-memory table from the backend; skipped when the table is
/// already warm this run.
pub fn hydrate_transposition_cache(table: &mut TranspositionTable) {
    if !table.is_empty() {
        log::info!("Transposition cache was already hydrated, skipping.");
        return;
    }

    log::info!("Hydrating transposition cache from persistence...");
    for (key, entry) in load_transposition_cache_data() {
        table.insert_hydrated(key, entry);
    }
    log::info!("Hydrated transposition cache with {} entries.", table.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dsn(name: &str) -> String {
        let mut path = std::env::temp_dir();
        path.push(format!("alphalcazar-{name}-{}.sqlite", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn moves_table_is_populated_once() {
        let dsn = temp_dsn("moves");
        {
            let db = DatabaseConnection::open_at(&dsn).unwrap();
            // 12 tiles by 5 pieces per player, plus one empty move each.
            assert_eq!(db.moves().len(), 2 * 12 * 5 + 2);
        }
        {
            let db = DatabaseConnection::open_at(&dsn).unwrap();
            assert_eq!(db.moves().len(), 2 * 12 * 5 + 2);
        }
        std::fs::remove_file(&dsn).ok();
    }

    #[test]
    fn exact_deep_entries_round_trip() {
        let dsn = temp_dsn("roundtrip");
        let db = DatabaseConnection::open_at(&dsn).unwrap();

        let game = Game::new();
        let mut table = TranspositionTable::new();
        let mut best_moves =
            get_legal_abstract_moves(&game.board, PlayerId::One, false)[0..2].to_vec();
        best_moves.push(AbstractMove::empty(PlayerId::One));
        table.store(
            best_moves.clone(),
            44,
            EvaluationType::Exact,
            PlayerId::One,
            &game.board,
            3,
            false,
        );

        // Too shallow, and a cutoff: neither is persisted.
        table.store(vec![], 10, EvaluationType::Exact, PlayerId::Two, &game.board, 1, false);
        let mut other = Game::new();
        let piece = other.board.piece_by_type(PlayerId::One, PieceType::Two);
        other.board.set_piece_direction(piece, Direction::East);
        other.board.place_piece(piece, other.board.tile_at(1, 1).unwrap());
        table.store(vec![], 70, EvaluationType::BetaCutoff, PlayerId::One, &other.board, 5, false);

        persist_into(&db, &table).unwrap();
        let data = load_from(&db).unwrap();
        assert_eq!(data.len(), 1);

        let entry = &data[&TranspositionTable::hash_key(PlayerId::One, &game.board)];
        assert_eq!(entry.best_moves, best_moves);
        assert_eq!(entry.score, 44);
        assert_eq!(entry.depth, 3);
        assert_eq!(entry.kind, EvaluationType::Exact);

        std::fs::remove_file(&dsn).ok();
    }

    #[test]
    fn hydration_skips_a_warm_table() {
        let game = Game::new();
        let mut table = TranspositionTable::new();
        table.store(vec![], 5, EvaluationType::Exact, PlayerId::One, &game.board, 2, false);

        // The DSN is not configured in tests; a warm table never touches it.
        hydrate_transposition_cache(&mut table);
        assert_eq!(table.len(), 1);
    }
}

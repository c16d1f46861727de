/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: SqlitePool, password: PasswordHasher
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - store は global にせず、ここから明示的に渡す (tests は独立した pool を注入する)
 */
use sqlx::SqlitePool;

use crate::services::PasswordHasher;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub password: PasswordHasher,
}

impl AppState {
    pub fn new(db: SqlitePool, password: PasswordHasher) -> Self {
        Self { db, password }
    }
}

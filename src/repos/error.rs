/*
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - store の制約違反 (unique / not null / foreign key) は Db から切り分けて返す
 */
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique { column: String },
    NotNull { column: String },
    ForeignKey,
}

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("constraint violation: {0:?}")]
    Constraint(ConstraintViolation),
}

pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            let column = constrained_column(dbe.message());
            let violation = match dbe.kind() {
                ErrorKind::UniqueViolation => {
                    column.map(|column| ConstraintViolation::Unique { column })
                }
                ErrorKind::NotNullViolation => {
                    column.map(|column| ConstraintViolation::NotNull { column })
                }
                ErrorKind::ForeignKeyViolation => Some(ConstraintViolation::ForeignKey),
                _ => None,
            };
            if let Some(violation) = violation {
                return RepoError::Constraint(violation);
            }
        }
        RepoError::Db(e)
    }
}

// SQLite: "UNIQUE constraint failed: Users.emailAddress"
// 複合制約の場合は先頭の列だけを使う
fn constrained_column(message: &str) -> Option<String> {
    let (_, columns) = message.split_once(": ")?;
    let first = columns.split(',').next()?.trim();
    let column = first.rsplit('.').next()?.trim_matches('"');
    (!column.is_empty()).then(|| column.to_string())
}

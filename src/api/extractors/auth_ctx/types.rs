/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が Basic 認証を検証して request extensions に格納し、handler はこの型だけを受け取る
 */

/// 認証済みのリクエストに付与されるコンテキスト
///
/// password hash は載せない (handler に渡す必要がない)
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
}

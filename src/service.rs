//! The user-record service behind the `auth_v1.AuthV1` RPC surface.

use std::future::Future;

use sqlx::PgPool;

use crate::auth::password;
use crate::db;
use crate::deadline::Deadline;
use crate::error::{AppError, Violation};
use crate::models::{NewUser, User};

pub const ROLE_USER: i16 = 0;
pub const ROLE_ADMIN: i16 = 1;

/// Handles `Get` and `Create`. Holds no per-request state; the pool is the
/// only thing shared between concurrent calls.
#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64, deadline: Deadline) -> Result<User, AppError> {
        validate_id(id)?;

        with_deadline(deadline, db::users::find_by_id(&self.pool, id))
            .await??
            .ok_or_else(|| AppError::NotFound(format!("user {id} not found")))
    }

    #[tracing::instrument(skip_all, fields(name = %new_user.name))]
    pub async fn create(&self, new_user: NewUser, deadline: Deadline) -> Result<i64, AppError> {
        let role = validate_new_user(&new_user)?;

        let NewUser {
            email,
            name,
            password,
            ..
        } = new_user;

        // Argon2 is CPU-bound; keep it off the async workers. It counts
        // against the caller's deadline like the insert does.
        let hashing = tokio::task::spawn_blocking(move || password::hash(&password));
        let pw_hash = tokio::time::timeout_at(deadline.expires_at(), hashing)
            .await
            .map_err(|_| deadline.exceeded())?
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))?
            .map_err(AppError::Internal)?;

        // The row only becomes visible on commit, which happens once the
        // insert has finished in time. A transaction dropped on expiry rolls
        // back, so a deadline error never leaves a user behind.
        let insert = async {
            let mut tx = self.pool.begin().await?;
            let id = db::users::create(&mut *tx, &name, &email, &pw_hash, role).await?;
            Ok::<_, sqlx::Error>((tx, id))
        };

        let (tx, id) = with_deadline(deadline, insert)
            .await?
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::AlreadyExists("A user with this email already exists".to_string())
                }
                _ => AppError::from(e),
            })?;
        tx.commit().await?;

        tracing::info!(user_id = id, name = %name, "inserted user");
        Ok(id)
    }
}

pub fn validate_id(id: i64) -> Result<(), AppError> {
    if id < 0 {
        return Err(AppError::invalid(Violation::UnsupportedId, "unsupported id"));
    }
    Ok(())
}

/// Check a create request and return the role narrowed to its column type.
///
/// Rules apply in order: required fields, role range, password confirmation.
pub fn validate_new_user(new_user: &NewUser) -> Result<i16, AppError> {
    let missing: Vec<&str> = [
        ("email", &new_user.email),
        ("name", &new_user.name),
        ("password", &new_user.password),
        ("password_confirm", &new_user.password_confirm),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(AppError::invalid(
            Violation::MissingFields,
            format!("missing required field(s): {}", missing.join(", ")),
        ));
    }

    let role = match i16::try_from(new_user.role) {
        Ok(role @ (ROLE_USER | ROLE_ADMIN)) => role,
        _ => {
            return Err(AppError::invalid(
                Violation::RoleOutOfRange,
                format!("unsupported role {}, expected 0 or 1", new_user.role),
            ));
        }
    };

    if new_user.password != new_user.password_confirm {
        return Err(AppError::invalid(
            Violation::PasswordMismatch,
            "passwords don't match",
        ));
    }

    Ok(role)
}

/// Run a storage call until the caller's deadline. On expiry the future is
/// dropped: a pending read is abandoned and its connection goes back to the
/// pool. Writes must run in a transaction so that dropping it rolls back.
async fn with_deadline<T>(
    deadline: Deadline,
    query: impl Future<Output = Result<T, sqlx::Error>>,
) -> Result<Result<T, sqlx::Error>, AppError> {
    tokio::time::timeout_at(deadline.expires_at(), query)
        .await
        .map_err(|_| deadline.exceeded())
}

use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use tokio::runtime::{Builder, Runtime};

use crate::config::DbConfig;
use crate::error::{AppError, AppResult};

/// Runs one stored procedure with positional string arguments and commits it.
pub trait ProcedureExecutor {
    fn call(&self, procedure: &str, args: &[String]) -> AppResult<()>;
}

/// Builds `CALL name(?, ?, ...)` for `arity` positional parameters.
pub fn call_statement(procedure: &str, arity: usize) -> AppResult<String> {
    let valid = !procedure.is_empty()
        && procedure
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(AppError::InvalidProcedure(procedure.to_string()));
    }

    let placeholders = vec!["?"; arity].join(", ");
    Ok(format!("CALL {procedure}({placeholders})"))
}

/// MySQL-backed executor.
///
/// The pool connects lazily, so the UI comes up even when the server is down
/// and the connection error is reported on the first operation instead.
/// Calls block on a current-thread runtime owned by the executor; the UI
/// thread waits for every round-trip.
pub struct MySqlExecutor {
    runtime: Runtime,
    pool: MySqlPool,
}

impl MySqlExecutor {
    pub fn connect_lazy(config: &DbConfig) -> AppResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = {
            let _guard = runtime.enter();
            MySqlPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
                .connect_lazy_with(options)
        };

        log::info!(
            "database pool ready for {}@{}:{}/{} (max {} connection(s))",
            config.user,
            config.host,
            config.port,
            config.database,
            config.max_connections
        );

        Ok(Self { runtime, pool })
    }

    async fn call_in_transaction(&self, statement: &str, args: &[String]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let mut query = sqlx::query(statement);
        for arg in args {
            query = query.bind(arg.as_str());
        }
        query.execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }
}

impl ProcedureExecutor for MySqlExecutor {
    fn call(&self, procedure: &str, args: &[String]) -> AppResult<()> {
        let statement = call_statement(procedure, args.len())?;
        log::info!("calling {} with {} argument(s)", procedure, args.len());
        log::debug!("{} args: {:?}", procedure, args);

        // the transaction rolls back on drop if anything above `commit` fails
        self.runtime
            .block_on(self.call_in_transaction(&statement, args))
            .inspect_err(|e| log::error!("{} failed: {}", procedure, e))
    }
}

impl Drop for MySqlExecutor {
    fn drop(&mut self) {
        let pool = self.pool.clone();
        self.runtime.block_on(pool.close());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_has_one_placeholder_per_argument() {
        assert_eq!(
            call_statement("sp_InsertGenre", 2).unwrap(),
            "CALL sp_InsertGenre(?, ?)"
        );
        assert_eq!(
            call_statement("sp_DeleteGame", 1).unwrap(),
            "CALL sp_DeleteGame(?)"
        );
        assert_eq!(call_statement("sp_Ping", 0).unwrap(), "CALL sp_Ping()");
    }

    #[test]
    fn non_identifier_procedure_names_are_rejected() {
        for name in ["", "sp_Insert Genre", "sp_x; DROP TABLE Games", "sp_`x`"] {
            match call_statement(name, 1) {
                Err(AppError::InvalidProcedure(n)) => assert_eq!(n, name),
                other => panic!("{name:?} accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn lazy_pool_does_not_touch_the_network() {
        let config = DbConfig {
            host: "127.0.0.1".into(),
            port: 1,
            ..DbConfig::default()
        };
        assert!(MySqlExecutor::connect_lazy(&config).is_ok());
    }

    #[test]
    fn invalid_procedure_fails_before_connecting() {
        let config = DbConfig {
            host: "127.0.0.1".into(),
            port: 1,
            ..DbConfig::default()
        };
        let executor = MySqlExecutor::connect_lazy(&config).unwrap();
        let err = executor
            .call("not a procedure", &["1".to_string()])
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidProcedure(_)));
    }
}

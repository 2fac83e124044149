use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{Result, schema};

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &quarry_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}

	pub async fn ensure_schema(&self, vector_dim: u32, ts_config: &str) -> Result<()> {
		let sql = schema::render_schema(vector_dim, ts_config);
		let lock_id: i64 = 8_214_553;
		// Advisory locks are held per connection. Use a single transaction so
		// the lock is scoped to one connection and automatically released when
		// the transaction ends.
		let mut tx = self.pool.begin().await?;

		sqlx::query("SELECT pg_advisory_xact_lock($1)").bind(lock_id).execute(&mut *tx).await?;
		// The schema contains plpgsql bodies, so it must run as one
		// multi-statement batch rather than statement-split.
		sqlx::raw_sql(sql.as_str()).execute(&mut *tx).await?;

		tx.commit().await?;

		Ok(())
	}
}

use crate::error::DbError;
use tokio_postgres::{Client, Config, NoTls};
use tracing::error;

/// Opens a plain-text client and drives its connection on a background task.
pub async fn connect_client(url: &str) -> Result<Client, DbError> {
    let config = url
        .parse::<Config>()
        .map_err(|e| DbError::InvalidUrl(e.to_string()))?;

    let (client, connection) = config.connect(NoTls).await?;
    tokio::spawn(async move {
        if let Err(err) = connection.await {
            error!(%err, "Postgres connection error");
        }
    });
    Ok(client)
}

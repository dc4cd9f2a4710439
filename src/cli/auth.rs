use crate::{
    config::{Config, Credentials},
    error::Result,
    info, spotify,
};

pub async fn auth(config: &Config) -> Result<()> {
    let credentials = Credentials::from_env()?;
    let token = spotify::auth::auth(config, &credentials).await?;

    info!("Access token: {}", token.access_token);
    info!("Granted scopes: {}", token.scope);
    Ok(())
}

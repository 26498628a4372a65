use log::info;
use tokio::fs;

use crate::config::Config;
use crate::db::FightStore;
use crate::error::AppError;
use crate::render;

pub async fn handle_new_fight(
    store: &dyn FightStore,
    food_a: &str,
    food_b: &str,
) -> Result<String, AppError> {
    let mut document = store.load().await?;
    let id = document.start_fight(food_a, food_b)?.id.clone();
    store.save(&document).await?;

    Ok(format!("created fight {}", id))
}

pub async fn handle_vote(
    store: &dyn FightStore,
    voter_id: &str,
    choice: &str,
) -> Result<String, AppError> {
    let mut document = store.load().await?;
    document.record_vote(voter_id, choice)?;
    store.save(&document).await?;

    Ok(format!("recorded vote {} {}", voter_id, choice))
}

pub async fn handle_render(store: &dyn FightStore, config: &Config) -> Result<String, AppError> {
    let document = store.load().await?;
    let page = render::render_page(&document, &config.timezone);

    let path = config.index_path();
    let render_error = |source| AppError::Render {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(&config.site_dir).await.map_err(render_error)?;
    fs::write(&path, page).await.map_err(render_error)?;

    info!(
        "Rendered {} ({} previous fight(s))",
        path.display(),
        document.history.len()
    );
    Ok(format!("rendered {}", path.display()))
}

pub async fn handle_status(store: &dyn FightStore, config: &Config) -> Result<String, AppError> {
    let document = store.load().await?;
    Ok(render::render_status(&document, &config.timezone)
        .trim_end()
        .to_string())
}

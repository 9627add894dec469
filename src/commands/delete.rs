use deaddit_admin::{
    application::{api::AdminApi, controller::ResourceListController, error::AppError},
    config::{BulkDeleteArgs, DeleteArgs},
    domain::kinds::ResourceKind,
    presentation::target::RenderTarget,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

pub async fn run_single<A, R>(
    console: &mut ResourceListController<A, R>,
    args: DeleteArgs,
) -> Result<(), AppError>
where
    A: AdminApi,
    R: RenderTarget,
{
    let kind = ResourceKind::from(args.target.kind);
    console.focus(kind)?;
    console.request_delete(kind, &args.target.id)?;
    finish(console, args.yes).await
}

pub async fn run_bulk<A, R>(
    console: &mut ResourceListController<A, R>,
    args: BulkDeleteArgs,
) -> Result<(), AppError>
where
    A: AdminApi,
    R: RenderTarget,
{
    let kind = ResourceKind::from(args.kind);
    console.focus(kind)?;
    for id in &args.ids {
        console.select(kind, id, true)?;
    }
    if console.request_bulk_delete(kind)?.is_none() {
        return Ok(());
    }
    finish(console, args.yes).await
}

async fn finish<A, R>(
    console: &mut ResourceListController<A, R>,
    yes: bool,
) -> Result<(), AppError>
where
    A: AdminApi,
    R: RenderTarget,
{
    if !yes && !confirm().await? {
        console.cancel_delete()?;
        info!("deletion cancelled");
        return Ok(());
    }
    console.confirm_delete().await?;
    Ok(())
}

/// Ask on stderr and read one answer line from stdin; only `y`/`yes` confirm.
async fn confirm() -> Result<bool, AppError> {
    let mut stderr = tokio::io::stderr();
    stderr.write_all(b"Proceed? [y/N] ").await?;
    stderr.flush().await?;

    let mut answer = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut answer)
        .await?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

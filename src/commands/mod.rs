//! Subcommand handlers. Each one drives the shared list controller against
//! the HTTP API and renders to the terminal.

mod delete;
mod edit;
mod list;

use deaddit_admin::{
    application::{
        controller::{ControllerOptions, ResourceListController},
        error::AppError,
    },
    config::{Command, Settings},
    domain::kinds::ResourceKind,
    infra::http_client::HttpAdminApi,
    presentation::terminal::TerminalRenderer,
};
use tracing::debug;

type Console =
    ResourceListController<HttpAdminApi, TerminalRenderer<std::io::Stdout, std::io::Stderr>>;

fn build_console(settings: &Settings) -> Result<Console, AppError> {
    let api = HttpAdminApi::new(settings.api.base_url.as_str())?;
    let options = ControllerOptions {
        per_page: settings.api.per_page,
        lookup_per_page: settings.api.lookup_per_page,
        notification_ttl: settings.notifications.ttl,
    };
    Ok(ResourceListController::new(api, TerminalRenderer::stdio(), options))
}

pub async fn dispatch(command: Command, settings: &Settings) -> Result<(), AppError> {
    let mut console = build_console(settings)?;
    debug!(base_url = %settings.api.base_url, "console ready");

    match command {
        Command::List(args) => list::run(&mut console, args).await,
        Command::Show(args) => {
            let kind = ResourceKind::from(args.kind);
            console.focus(kind)?;
            console.fetch_record_for_edit(kind, &args.id).await?;
            Ok(())
        }
        Command::Edit(args) => edit::run(&mut console, args.target).await,
        Command::Delete(args) => delete::run_single(&mut console, args).await,
        Command::BulkDelete(args) => delete::run_bulk(&mut console, args).await,
        Command::Categories => {
            console.load_category_options().await?;
            Ok(())
        }
    }
}

use std::num::NonZeroU32;

use deaddit_admin::{
    application::{
        api::{AdminApi, ListQuery},
        controller::ResourceListController,
        error::AppError,
    },
    config::ListArgs,
    domain::kinds::ResourceKind,
    presentation::target::RenderTarget,
};

pub async fn run<A, R>(
    console: &mut ResourceListController<A, R>,
    args: ListArgs,
) -> Result<(), AppError>
where
    A: AdminApi,
    R: RenderTarget,
{
    let kind = ResourceKind::from(args.kind);
    if args.subdeaddit.is_some() && kind != ResourceKind::Post {
        return Err(AppError::invalid_input("--subdeaddit only applies to posts"));
    }

    let page = NonZeroU32::new(args.page).unwrap_or(NonZeroU32::MIN);
    let mut query = ListQuery::new(kind, console.state().per_page())
        .with_page(page)
        .with_search(args.search);
    query.category = args.subdeaddit;

    console.open(query).await?;
    Ok(())
}

use deaddit_admin::{
    application::{api::AdminApi, controller::ResourceListController, error::AppError},
    config::EditTarget,
    domain::records::RecordPatch,
    presentation::target::RenderTarget,
};

pub async fn run<A, R>(
    console: &mut ResourceListController<A, R>,
    target: EditTarget,
) -> Result<(), AppError>
where
    A: AdminApi,
    R: RenderTarget,
{
    let kind = target.kind();
    console.focus(kind)?;
    let record = console.fetch_record_for_edit(kind, target.id()).await?;
    let patch = merge(record.to_patch(), &target)?;
    console.save_record(kind, target.id(), &patch).await?;
    Ok(())
}

/// Overlay the fields given on the command line onto the record's current
/// values. Fails when no field was given.
fn merge(patch: RecordPatch, target: &EditTarget) -> Result<RecordPatch, AppError> {
    fn set<T: Clone>(field: &mut T, value: Option<&T>, changed: &mut bool) {
        if let Some(value) = value {
            *field = value.clone();
            *changed = true;
        }
    }

    let mut changed = false;
    let patch = match (patch, target) {
        (RecordPatch::User(mut user), EditTarget::User(args)) => {
            if let Some(age) = args.age {
                user.age = Some(age);
                changed = true;
            }
            set(&mut user.gender, args.gender.as_ref(), &mut changed);
            set(&mut user.occupation, args.occupation.as_ref(), &mut changed);
            set(&mut user.education, args.education.as_ref(), &mut changed);
            set(&mut user.bio, args.bio.as_ref(), &mut changed);
            set(&mut user.interests, args.interests.as_ref(), &mut changed);
            set(
                &mut user.personality_traits,
                args.personality_traits.as_ref(),
                &mut changed,
            );
            set(
                &mut user.writing_style,
                args.writing_style.as_ref(),
                &mut changed,
            );
            RecordPatch::User(user)
        }
        (RecordPatch::Subdeaddit(mut sub), EditTarget::Subdeaddit(args)) => {
            set(&mut sub.description, args.description.as_ref(), &mut changed);
            set(&mut sub.post_types, args.post_types.as_ref(), &mut changed);
            RecordPatch::Subdeaddit(sub)
        }
        (RecordPatch::Post(mut post), EditTarget::Post(args)) => {
            set(&mut post.title, args.title.as_ref(), &mut changed);
            set(&mut post.content, args.content.as_ref(), &mut changed);
            set(&mut post.upvote_count, args.upvote_count.as_ref(), &mut changed);
            set(&mut post.post_type, args.post_type.as_ref(), &mut changed);
            RecordPatch::Post(post)
        }
        (RecordPatch::Comment(mut comment), EditTarget::Comment(args)) => {
            set(&mut comment.content, args.content.as_ref(), &mut changed);
            set(
                &mut comment.upvote_count,
                args.upvote_count.as_ref(),
                &mut changed,
            );
            RecordPatch::Comment(comment)
        }
        (patch, target) => {
            return Err(AppError::invalid_input(format!(
                "cannot apply {} fields to a {} record",
                target.kind().singular(),
                patch.kind().singular()
            )));
        }
    };

    if !changed {
        return Err(AppError::invalid_input("no fields to update were given"));
    }
    Ok(patch)
}

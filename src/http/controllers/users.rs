use actix_web::{web, HttpResponse};
use thiserror::Error;
use tracing::info;

use crate::{
    http::Error,
    types::{
        self,
        form::users::create,
        id::{marker::UserMarker, Id},
        validation::Validate,
    },
    App,
};

#[derive(Debug, Error)]
#[error("User not found")]
struct UserNotFound;

#[tracing::instrument(skip_all)]
pub async fn list(app: web::Data<App>) -> Result<HttpResponse, Error> {
    let users = app.users.list_all().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[tracing::instrument(skip_all)]
pub async fn create(
    app: web::Data<App>,
    form: web::Json<create::Request>,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner().validate()?;
    let user = app.users.insert(&form).await?;
    info!(user.id = %user.id, "Created user");

    Ok(HttpResponse::Created().json(user))
}

#[tracing::instrument(skip(app))]
pub async fn get(app: web::Data<App>, path: web::Path<String>) -> Result<HttpResponse, Error> {
    // Anything that is not a positive integer cannot be an ID
    // of an existing user.
    let Ok(id) = path.parse::<Id<UserMarker>>() else {
        return Err(Error::from_context(types::Error::UserNotFound, UserNotFound));
    };

    match app.users.find_by_id(id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(Error::from_context(types::Error::UserNotFound, UserNotFound)),
    }
}

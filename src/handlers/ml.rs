use actix_web::{HttpResponse, web};

use crate::auth::authorization::require_role;
use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::ml::{CropFeatures, MlClient};
use crate::models::users::Role;

/// POST /api/crop-prediction — proxy a farmer's soil/weather parameters to
/// the external classifier and return its recommendation.
pub async fn predict_crop(
    user: AuthenticatedUser,
    ml: web::Data<MlClient>,
    body: web::Json<CropFeatures>,
) -> Result<HttpResponse, ApiError> {
    require_role(&user.0, &[Role::Farmer])?;

    let prediction = ml.predict(&body).await?;
    Ok(HttpResponse::Ok().json(prediction))
}

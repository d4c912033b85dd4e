use crate::error::ApiError;
use crate::models::contracts;
use crate::models::users::{Model as User, Role, VerificationStatus};

/// Role gate for an operation. Company actors must additionally hold a
/// verified account before any gated operation succeeds, mirroring the
/// create-contract verification gate.
pub fn require_role(user: &User, allowed: &[Role]) -> Result<(), ApiError> {
    if !allowed.contains(&user.role) {
        return Err(ApiError::Forbidden(
            "Access denied. Insufficient permissions".into(),
        ));
    }

    if user.role == Role::Company && user.verification_status != VerificationStatus::Verified {
        return Err(ApiError::Forbidden(
            "Company account not verified. Please wait for admin verification".into(),
        ));
    }

    Ok(())
}

/// The actor must be a party to the contract: the owning company or the
/// selected farmer.
pub fn require_contract_party(contract: &contracts::Model, user: &User) -> Result<(), ApiError> {
    let is_company = contract.company_id == user.id;
    let is_farmer = contract.selected_farmer_id == Some(user.id);

    if !is_company && !is_farmer {
        return Err(ApiError::Forbidden(
            "You are not a party to this contract".into(),
        ));
    }

    Ok(())
}

/// The actor must own the contract.
pub fn require_contract_owner(contract: &contracts::Model, user: &User) -> Result<(), ApiError> {
    if contract.company_id != user.id {
        return Err(ApiError::Forbidden(
            "You do not own this contract".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn user(role: Role, verification: VerificationStatus) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test".into(),
            email: "test@example.com".into(),
            phone: "9999999999".into(),
            role,
            verification_status: verification,
            verification_remarks: String::new(),
            verified_by: None,
            verified_at: None,
            is_active: true,
            village: None,
            district: None,
            state: None,
            pincode: None,
            land_size: None,
            company_name: None,
            registration_number: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn unverified_company_is_gated() {
        let pending = user(Role::Company, VerificationStatus::Pending);
        assert!(require_role(&pending, &[Role::Company]).is_err());

        let verified = user(Role::Company, VerificationStatus::Verified);
        assert!(require_role(&verified, &[Role::Company]).is_ok());

        let blocked = user(Role::Company, VerificationStatus::Blocked);
        assert!(require_role(&blocked, &[Role::Company]).is_err());
    }

    #[test]
    fn farmers_do_not_need_verification() {
        let farmer = user(Role::Farmer, VerificationStatus::Verified);
        assert!(require_role(&farmer, &[Role::Farmer, Role::Company]).is_ok());
        assert!(require_role(&farmer, &[Role::Admin]).is_err());
    }
}

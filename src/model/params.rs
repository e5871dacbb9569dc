//! Caller-supplied inputs of the user management operations.

#[derive(Debug, Clone, Default)]
pub struct AddUserRequest {
    pub mobile_phone: String,
    pub user_code: String,
    pub id_card: String,
    pub password: String,
    pub default_password: String,
    pub university: String,
    /// overrides the configured service identify when not empty
    pub service_identify: String,
}

#[derive(Debug, Clone, Default)]
pub struct EditUserRequest {
    pub mobile_phone: String,
    pub user_code: String,
    pub id_card: String,
    pub university: String,
    /// overrides the configured service identify when not empty
    pub service_identify: String,
}

#[derive(Debug, Clone, Default)]
pub struct MergeUserRequest {
    pub uid: String,
    pub t_uid: String,
    pub t_user_code: String,
    pub t_university: String,
}

#[derive(Debug, Clone, Default)]
pub struct MergeTelUserRequest {
    pub m_uid: String,
    pub c_uid: String,
}

#[derive(Debug, Clone, Default)]
pub struct ClearAuthRequest {
    pub uid: String,
    pub university: String,
}

#[derive(Debug, Clone, Default)]
pub struct AddStaffUserRequest {
    pub uid: String,
    pub mobile_phone: String,
    pub user_code: String,
    pub id_card: String,
    pub password: String,
    pub university: String,
    pub name: String,
    /// F or M
    pub sex: String,
    pub dept_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserBasicRequest {
    pub uid: String,
    pub name: String,
    pub dept_id: String,
}

/// Password grant parameters.
#[derive(Debug, Clone, Default)]
pub struct PasswordRequest {
    pub client_id: String,
    pub client_secret: String,
    /// 1 phone / id card, 2 university + user code
    pub login_model: i32,
    pub university: String,
    pub user_name: String,
    pub service: String,
    pub password: String,
}

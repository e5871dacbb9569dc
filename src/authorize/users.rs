//! User account operations. Bodies are plain JSON maps and never cached.

use serde_json::json;

use crate::authorize::handle::AuthorizeHandle;
use crate::dispatch::sink::{Discard, Json};
use crate::error::error_result::ErrorResult;
use crate::model::params::{
    AddStaffUserRequest, AddUserRequest, ClearAuthRequest, EditUserRequest, MergeTelUserRequest,
    MergeUserRequest, UpdateUserBasicRequest,
};
use crate::model::user::{
    AntUidList, DefaultPwdState, LoginUserInfo, UserActivateInfo, UserUpdateInfo, UserVersion,
};
use crate::token::TokenProvider;
use crate::transport::Transport;
use crate::utils::constants::*;

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}

impl<T: Transport, P: TokenProvider> AuthorizeHandle<T, P> {
    fn identify(&self) -> &str {
        &self.cfg.service_identify
    }

    /// Check a user's password, returning the account on success.
    pub async fn verify_login(&self, uid: &str, password: &str) -> Result<LoginUserInfo, ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": uid,
            "Password": password,
        });
        self.token_post::<Json<LoginUserInfo>, _>(ROUTER_VERIFY_LOGIN, &body).await
    }

    pub async fn get_user(&self, uid: &str) -> Result<LoginUserInfo, ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": uid,
        });
        self.token_post::<Json<LoginUserInfo>, _>(ROUTER_GET_USER, &body).await
    }

    pub async fn add_user(&self, uid: &str, user: &AddUserRequest) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": or_default(&user.service_identify, self.identify()),
            "UID": uid,
            "MobilePhone": user.mobile_phone,
            "UserCode": user.user_code,
            "IDCard": user.id_card,
            "Password": user.password,
            "DefaultPassword": user.default_password,
            "University": user.university,
        });
        self.token_post::<Discard, _>(ROUTER_ADD_USER, &body).await
    }

    pub async fn edit_user(&self, uid: &str, user: &EditUserRequest) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": or_default(&user.service_identify, self.identify()),
            "UID": uid,
            "MobilePhone": user.mobile_phone,
            "UserCode": user.user_code,
            "IDCard": user.id_card,
            "University": user.university,
        });
        self.token_post::<Discard, _>(ROUTER_EDIT_USER, &body).await
    }

    pub async fn del_user(&self, uid: &str) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": uid,
        });
        self.token_post::<Discard, _>(ROUTER_DEL_USER, &body).await
    }

    /// Change a password; `service` overrides the configured service identify.
    pub async fn modify_pwd(&self, uid: &str, password: &str, service: Option<&str>) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": service.unwrap_or(self.identify()),
            "UID": uid,
            "Password": password,
        });
        self.token_post::<Discard, _>(ROUTER_MODIFY_PWD, &body).await
    }

    /// Whether the user still has the default password.
    pub async fn check_default_pwd(&self, uid: &str) -> Result<bool, ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": uid,
        });
        self.token_post::<Json<DefaultPwdState>, _>(ROUTER_CHECK_DEFAULT_PWD, &body)
            .await
            .map(|state| state.is_default)
    }

    pub async fn merge_user(&self, req: &MergeUserRequest) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": req.uid,
            "TUID": req.t_uid,
            "TUserCode": req.t_user_code,
            "TUniversity": req.t_university,
        });
        self.token_post::<Discard, _>(ROUTER_MERGE_USER, &body).await
    }

    /// Merge two accounts registered with the same phone number.
    pub async fn merge_tel_user(&self, req: &MergeTelUserRequest) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "MUID": req.m_uid,
            "CUID": req.c_uid,
        });
        self.token_post::<Discard, _>(ROUTER_MERGE_TEL_USER, &body).await
    }

    pub async fn clear_auth(&self, req: &ClearAuthRequest) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": req.uid,
            "University": req.university,
        });
        self.token_post::<Discard, _>(ROUTER_CLEAR_AUTH, &body).await
    }

    pub async fn add_staff_user(&self, req: &AddStaffUserRequest) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": req.uid,
            "MobilePhone": req.mobile_phone,
            "UserCode": req.user_code,
            "IDCard": req.id_card,
            "Password": req.password,
            "University": req.university,
            "Name": req.name,
            "Sex": req.sex,
            "DeptID": req.dept_id,
        });
        self.token_post::<Discard, _>(ROUTER_ADD_STAFF_USER, &body).await
    }

    pub async fn update_user_basic(&self, req: &UpdateUserBasicRequest) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": req.uid,
            "Name": req.name,
            "DeptID": req.dept_id,
        });
        self.token_post::<Discard, _>(ROUTER_UPDATE_USER_BASIC, &body).await
    }

    pub async fn get_user_version(&self, uid: &str) -> Result<UserVersion, ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": uid,
        });
        self.token_post::<Json<UserVersion>, _>(ROUTER_GET_USER_VERSION, &body).await
    }

    pub async fn user_activate(&self, uid: &str) -> Result<UserActivateInfo, ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": uid,
        });
        self.token_post::<Json<UserActivateInfo>, _>(ROUTER_USER_ACTIVATE, &body).await
    }

    pub async fn get_user_update(&self, uid: &str) -> Result<UserUpdateInfo, ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": uid,
        });
        self.token_post::<Json<UserUpdateInfo>, _>(ROUTER_GET_USER_UPDATE, &body).await
    }

    pub async fn del_staff_user(&self, uid: &str) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": uid,
        });
        self.token_post::<Discard, _>(ROUTER_DEL_STAFF_USER, &body).await
    }

    pub async fn update_auth_status(&self, uid: &str) -> Result<(), ErrorResult> {
        let body = json!({
            "ServiceIdentify": self.identify(),
            "UID": uid,
        });
        self.token_post::<Discard, _>(ROUTER_UPDATE_AUTH_STATUS, &body).await
    }

    /// ANT user ids of `uids`; `service` overrides the configured service identify.
    pub async fn get_ant_uid_list(&self, service: Option<&str>, uids: &[String]) -> Result<Vec<String>, ErrorResult> {
        let body = json!({
            "ServiceIdentify": or_default(service.unwrap_or_default(), self.identify()),
            "UID": uids,
        });
        self.token_post::<Json<AntUidList>, _>(ROUTER_GET_ANT_USER, &body)
            .await
            .map(|list| list.ant_uid)
    }
}

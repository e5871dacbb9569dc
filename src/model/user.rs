use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LoginUserInfo {
    pub mobile_phone: String,
    pub user_code: String,
    #[serde(rename = "IDCard")]
    pub id_card: String,
    pub password: String,
    pub default_password: String,
    pub university: String,
    pub user_type: String,
}

/// Staff parameters of a user, as returned by `getstaffparam`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StaffParam {
    #[serde(rename = "BuID")]
    pub bu_id: String,
    pub addr: String,
    pub university: String,
    pub intel_user_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserVersion {
    /// 0 keep, 1 clear
    pub clear_auth: i32,
    pub version: i32,
    /// 0 activated, 1 not activated
    pub activate: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserActivateInfo {
    pub mobile_phone: String,
    pub user_code: String,
    #[serde(rename = "IDCard")]
    pub id_card: String,
    pub university: String,
    pub real_name: String,
    /// F or M
    pub sex: String,
    #[serde(rename = "DeptID")]
    pub dept_id: String,
    /// 1 student, 2 teacher
    pub user_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct UserUpdateInfo {
    pub real_name: String,
    #[serde(rename = "DeptID")]
    pub dept_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct DefaultPwdState {
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub(crate) struct UserCodeResult {
    pub user_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AntUidList {
    #[serde(rename = "ANTUID")]
    pub ant_uid: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct UidResult {
    #[serde(rename = "UID")]
    pub uid: String,
}

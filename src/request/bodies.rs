//! Request bodies that carry their own cache policy.

use serde::Serialize;

use crate::request::reader::{RequestBody, RequestReader};
use crate::utils::constants::{
    ANT_UID_CACHE_TTL_SECS, ROUTER_ANT_UID_BY_UNIVERSITY, ROUTER_GET_STAFF_PARAM, ROUTER_USER_CODE,
    STAFF_PARAM_CACHE_TTL_SECS, USER_CODE_CACHE_TTL_SECS,
};

/// Joins the parts into a fingerprint; empty when the identifying field is empty.
fn fingerprint(tag: &str, identity: &str, parts: &[&str]) -> String {
    if identity.is_empty() {
        return String::new();
    }
    let mut key = format!("{}|{}", tag, identity);
    for part in parts {
        key.push('|');
        key.push_str(part);
    }
    key
}

#[derive(Debug, Clone, Serialize)]
pub struct GetStaffParamRequest {
    #[serde(rename = "ServiceIdentify")]
    pub service_identify: String,
    #[serde(rename = "UID")]
    pub uid: String,
}

impl RequestReader for GetStaffParamRequest {
    fn expires(&self, router: &str) -> i64 {
        match router {
            ROUTER_GET_STAFF_PARAM => STAFF_PARAM_CACHE_TTL_SECS,
            _ => 0,
        }
    }

    fn hash(&self) -> String {
        fingerprint("staffparam", &self.uid, &[&self.service_identify])
    }
}

impl RequestBody for GetStaffParamRequest {
    fn reader(&self) -> Option<&dyn RequestReader> {
        Some(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetUserCodeRequest {
    #[serde(rename = "UID")]
    pub uid: String,
}

impl RequestReader for GetUserCodeRequest {
    fn expires(&self, router: &str) -> i64 {
        match router {
            ROUTER_USER_CODE => USER_CODE_CACHE_TTL_SECS,
            _ => 0,
        }
    }

    fn hash(&self) -> String {
        fingerprint("usercode", &self.uid, &[])
    }
}

impl RequestBody for GetUserCodeRequest {
    fn reader(&self) -> Option<&dyn RequestReader> {
        Some(self)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAntUidByUniversityRequest {
    #[serde(rename = "ServiceIdentify")]
    pub service_identify: String,
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "University")]
    pub university: String,
}

impl RequestReader for GetAntUidByUniversityRequest {
    fn expires(&self, router: &str) -> i64 {
        match router {
            ROUTER_ANT_UID_BY_UNIVERSITY => ANT_UID_CACHE_TTL_SECS,
            _ => 0,
        }
    }

    fn hash(&self) -> String {
        fingerprint("antuid", &self.user_id, &[&self.university, &self.service_identify])
    }
}

impl RequestBody for GetAntUidByUniversityRequest {
    fn reader(&self) -> Option<&dyn RequestReader> {
        Some(self)
    }
}

//! Staff and identity lookups. These bodies implement `RequestReader`, so
//! their results are served from the response cache when it is enabled.

use crate::authorize::handle::AuthorizeHandle;
use crate::dispatch::sink::Json;
use crate::error::error_result::ErrorResult;
use crate::model::user::{StaffParam, UidResult, UserCodeResult};
use crate::request::bodies::{GetAntUidByUniversityRequest, GetStaffParamRequest, GetUserCodeRequest};
use crate::token::TokenProvider;
use crate::transport::Transport;
use crate::utils::constants::{
    ANT_SERVICE_IDENTIFY, ROUTER_ANT_UID_BY_UNIVERSITY, ROUTER_GET_STAFF_PARAM, ROUTER_USER_CODE,
};

impl<T: Transport, P: TokenProvider> AuthorizeHandle<T, P> {
    /// Business id and service address of `uid` within service `identify`.
    pub async fn get_staff_param(&self, identify: &str, uid: &str) -> Result<(String, String), ErrorResult> {
        let body = GetStaffParamRequest {
            service_identify: identify.to_owned(),
            uid: uid.to_owned(),
        };
        // decoded into the full shape so a cached entry serves both staff lookups
        let param = self.token_post::<Json<StaffParam>, _>(ROUTER_GET_STAFF_PARAM, &body).await?;
        Ok((param.bu_id, param.addr))
    }

    pub async fn get_ant_staff_param(&self, uid: &str) -> Result<StaffParam, ErrorResult> {
        let body = GetStaffParamRequest {
            service_identify: ANT_SERVICE_IDENTIFY.to_owned(),
            uid: uid.to_owned(),
        };
        self.token_post::<Json<StaffParam>, _>(ROUTER_GET_STAFF_PARAM, &body).await
    }

    pub async fn get_user_code(&self, uid: &str) -> Result<String, ErrorResult> {
        let body = GetUserCodeRequest { uid: uid.to_owned() };
        self.token_post::<Json<UserCodeResult>, _>(ROUTER_USER_CODE, &body)
            .await
            .map(|res| res.user_code)
    }

    /// ANT user id of `user_id` at `university`.
    pub async fn get_ant_uid_by_university(&self, user_id: &str, university: &str) -> Result<String, ErrorResult> {
        let body = GetAntUidByUniversityRequest {
            service_identify: self.cfg.service_identify.clone(),
            user_id: user_id.to_owned(),
            university: university.to_owned(),
        };
        self.token_post::<Json<UidResult>, _>(ROUTER_ANT_UID_BY_UNIVERSITY, &body)
            .await
            .map(|res| res.uid)
    }
}

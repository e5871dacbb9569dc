//! Shared constants and invariants

pub const DEFAULT_CACHE_GC_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_TOKEN_SAFETY_MARGIN_SECS: u64 = 60;

pub const ROUTER_PLACEHOLDER: &str = "{router}";

/// header carrying the service bearer token on authorize endpoints
pub const ACCESS_TOKEN_HEADER: &str = "AccessToken";

// OAuth2 endpoints
pub const ROUTER_TOKEN: &str = "/oauth2/token";
pub const ROUTER_VERIFY: &str = "/oauth2/verify";
pub const ROUTER_VERIFY_V2: &str = "/oauth2/verify/v2";

// Authorize endpoints
pub const ROUTER_VERIFY_LOGIN: &str = "/api/authorize/verifylogin";
pub const ROUTER_GET_USER: &str = "/api/authorize/getuser";
pub const ROUTER_ADD_USER: &str = "/api/authorize/adduser";
pub const ROUTER_EDIT_USER: &str = "/api/authorize/edituser";
pub const ROUTER_DEL_USER: &str = "/api/authorize/deluser";
pub const ROUTER_MODIFY_PWD: &str = "/api/authorize/modifypwd";
pub const ROUTER_CHECK_DEFAULT_PWD: &str = "/api/authorize/checkdefaultpwd";
pub const ROUTER_MERGE_USER: &str = "/api/authorize/mergeuser";
pub const ROUTER_GET_STAFF_PARAM: &str = "/api/authorize/getstaffparam";
pub const ROUTER_MERGE_TEL_USER: &str = "/api/authorize/mergeteluser";
pub const ROUTER_CLEAR_AUTH: &str = "/api/authorize/clearauth";
pub const ROUTER_USER_CODE: &str = "/api/authorize/usercode";
pub const ROUTER_ADD_STAFF_USER: &str = "/api/authorize/addstaffuser";
pub const ROUTER_UPDATE_USER_BASIC: &str = "/api/authorize/updateuserbasic";
pub const ROUTER_GET_USER_VERSION: &str = "/api/authorize/getuserversion";
pub const ROUTER_USER_ACTIVATE: &str = "/api/authorize/useractivate";
pub const ROUTER_GET_USER_UPDATE: &str = "/api/authorize/getuserupdate";
pub const ROUTER_DEL_STAFF_USER: &str = "/api/authorize/delstaffuser";
pub const ROUTER_UPDATE_AUTH_STATUS: &str = "/api/authorize/updateauthstatus";
pub const ROUTER_GET_ANT_USER: &str = "/api/authorize/getantuser";
pub const ROUTER_ANT_UID_BY_UNIVERSITY: &str = "/api/authorize/antuidbyuniversity";

/// service identify used for ANT staff lookups
pub const ANT_SERVICE_IDENTIFY: &str = "ANT";

// cache ttl per cacheable endpoint (seconds)
pub const STAFF_PARAM_CACHE_TTL_SECS: i64 = 600;
pub const USER_CODE_CACHE_TTL_SECS: i64 = 3600;
pub const ANT_UID_CACHE_TTL_SECS: i64 = 600;

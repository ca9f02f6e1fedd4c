/// Version segment of every portal endpoint path
pub const PROTOCOL_VERSION: &str = "QH65B2";
/// Default base URL of the developer portal account services
pub const DEFAULT_BASE_URL: &str = "https://developer.apple.com/services-account/QH65B2/";
/// Default base URL of the services host used by the IDE (XML property lists)
pub const DEFAULT_XCODE_BASE_URL: &str = "https://developerservices2.apple.com/services/QH65B2/";
/// Default Apple ID sign-in endpoint
pub const DEFAULT_SIGN_IN_URL: &str = "https://idmsa.apple.com/appleauth/auth/signin";
/// Default transport timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Number of records requested per page on every paginated listing
pub const DEFAULT_PAGE_SIZE: u32 = 500;
/// User agent string sent with every request
pub const USER_AGENT: &str = "devportal-client/0.1.0";
/// Cookie that marks a fully authenticated session
pub const AUTH_MARKER_COOKIE: &str = "myacinfo";
/// Response/request header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "csrf";
/// Response/request header carrying the anti-forgery token timestamp
pub const CSRF_TS_HEADER: &str = "csrf_ts";
/// Substring every legitimate certificate download contains
pub const CERTIFICATE_MARKER: &str = "Apple Inc";
/// Substring every legitimate provisioning profile download contains
pub const PROFILE_MARKER: &str = "DOCTYPE plist PUBLIC";
/// Team type reported for enterprise in-house teams
pub const IN_HOUSE_TEAM_TYPE: &str = "In-House";
/// Every certificate type identifier, used when listing all certificates
pub const ALL_CERTIFICATE_TYPE_IDS: &[&str] = &[
    "5QPB9NHCEI", // development push
    "R58UK2EWSO", // production push
    "9RQEK7MSXA", // in-house
    "LA30L5BJEU", // MDM CSR
    "BKLRAVXMGM", // development
    "UPV3DW712I", // production
    "Y3B2F3TYSI", // pass type
    "3T2ZP62QW8", // website push
    "E5D663CMZW", // VoIP push
    "4APLUP237T", // Apple Pay
];

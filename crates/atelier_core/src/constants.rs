pub mod collections {
    pub const PREFAB: &str = "_Prefab";
    pub const USER: &str = "_User";
    pub const CATEGORY: &str = "_Category";
}

/// Stored field names.
pub mod fields {
    pub const ID: &str = "_id";
    pub const NAME: &str = "Name";
    pub const CATEGORY: &str = "Category";
    pub const TOTAL_PINYIN: &str = "TotalPinYin";
    pub const FIRST_PINYIN: &str = "FirstPinYin";
    pub const CREATE_TIME: &str = "CreateTime";
    pub const UPDATE_TIME: &str = "UpdateTime";
    pub const DATA: &str = "Data";
    pub const THUMBNAIL: &str = "Thumbnail";
    pub const OWNER: &str = "UserID";
    pub const TYPE: &str = "Type";

    pub const USERNAME: &str = "Username";
    pub const PASSWORD: &str = "Password";
}

/// Category type discriminator for prefabs.
pub const PREFAB_CATEGORY_TYPE: &str = "Prefab";

/// Default display name of the administrator account.
pub const ADMINISTRATOR: &str = "Administrator";

/// Default name of the session cookie.
pub const SESSION_COOKIE: &str = "UserID";

pub mod routes {
    pub const HEALTH: &str = "/health";

    pub const PREFAB_LIST: &str = "/api/Prefab/List";
    pub const PREFAB_GET: &str = "/api/Prefab/Get";
    pub const PREFAB_EDIT: &str = "/api/Prefab/Edit";
    pub const PREFAB_SAVE: &str = "/api/Prefab/Save";
    pub const PREFAB_DELETE: &str = "/api/Prefab/Delete";

    pub const LOGIN: &str = "/api/Login/Login";
    pub const LOGOUT: &str = "/api/Login/Logout";
}

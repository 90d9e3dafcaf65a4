//! Bundled English/Chinese message catalog.
//!
//! Keys are a closed enum so a missing translation is a compile error, not
//! a runtime blank. Chinese is the fallback language: English lookups that
//! come back empty resolve through the Chinese table.

use promptshare_core::config::Lang;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    // ── Common ───────────────────────────────────────────────────────
    Loading,
    NoMoreContent,
    NoResults,
    Search,
    SearchPrompts,
    Cancel,
    Close,
    Upload,
    Download,

    // ── Tabs / navigation ────────────────────────────────────────────
    TabPrompts,
    TabMyPrompts,
    TabFiles,
    TabSettings,
    Login,
    Logout,

    // ── Login / register ─────────────────────────────────────────────
    LoginTitle,
    Username,
    Password,
    LoginButton,
    LoginFailed,
    RegisterTitle,
    RegisterButton,
    RegisterSuccess,
    RegisterFailed,
    AlreadyHaveAccount,
    GoToLogin,
    NotLoggedIn,
    LoginRequired,

    // ── Prompt detail ────────────────────────────────────────────────
    PromptDetails,
    Author,
    Source,
    EffectImages,
    ImageUrlNotProvided,

    // ── Prompt editor ────────────────────────────────────────────────
    CreatePrompt,
    EditPrompt,
    PromptTitle,
    PromptContent,
    PromptTags,
    PromptSourceUrl,
    PromptSourceBy,
    PromptSourceTags,
    AddImage,
    ImageTags,
    SaveChanges,
    PromptCreateSuccess,
    PromptCreateFailed,
    PromptUpdateSuccess,
    PromptUpdateFailed,

    // ── Files ────────────────────────────────────────────────────────
    FileManagement,
    UploadFile,
    FileUploadSuccess,
    FileUploadFailed,
    FileDownloadSuccess,
    FileDownloadFailed,
    NoFiles,
    NoMoreFiles,
    FileName,
    FileSize,
    FileTime,

    // ── Settings ─────────────────────────────────────────────────────
    SettingsServer,
    SettingsServerUrl,
    SettingsServerUrlDesc,
    SettingsAccount,
    SettingsAccountStatus,
    SettingsAccountStatusDesc,
    SettingsInterface,
    SettingsLanguage,
    SettingsLanguageDesc,
    SettingsTheme,
    SettingsThemeDesc,
    SettingsPageSize,
    SettingsPageSizeDesc,
    SettingsDebounce,
    SettingsDebounceDesc,
    SettingsSaved,

    // ── Help ─────────────────────────────────────────────────────────
    HelpTitle,
}

impl Msg {
    pub const ALL: &'static [Msg] = &[
        Msg::Loading,
        Msg::NoMoreContent,
        Msg::NoResults,
        Msg::Search,
        Msg::SearchPrompts,
        Msg::Cancel,
        Msg::Close,
        Msg::Upload,
        Msg::Download,
        Msg::TabPrompts,
        Msg::TabMyPrompts,
        Msg::TabFiles,
        Msg::TabSettings,
        Msg::Login,
        Msg::Logout,
        Msg::LoginTitle,
        Msg::Username,
        Msg::Password,
        Msg::LoginButton,
        Msg::LoginFailed,
        Msg::RegisterTitle,
        Msg::RegisterButton,
        Msg::RegisterSuccess,
        Msg::RegisterFailed,
        Msg::AlreadyHaveAccount,
        Msg::GoToLogin,
        Msg::NotLoggedIn,
        Msg::LoginRequired,
        Msg::PromptDetails,
        Msg::Author,
        Msg::Source,
        Msg::EffectImages,
        Msg::ImageUrlNotProvided,
        Msg::CreatePrompt,
        Msg::EditPrompt,
        Msg::PromptTitle,
        Msg::PromptContent,
        Msg::PromptTags,
        Msg::PromptSourceUrl,
        Msg::PromptSourceBy,
        Msg::PromptSourceTags,
        Msg::AddImage,
        Msg::ImageTags,
        Msg::SaveChanges,
        Msg::PromptCreateSuccess,
        Msg::PromptCreateFailed,
        Msg::PromptUpdateSuccess,
        Msg::PromptUpdateFailed,
        Msg::FileManagement,
        Msg::UploadFile,
        Msg::FileUploadSuccess,
        Msg::FileUploadFailed,
        Msg::FileDownloadSuccess,
        Msg::FileDownloadFailed,
        Msg::NoFiles,
        Msg::NoMoreFiles,
        Msg::FileName,
        Msg::FileSize,
        Msg::FileTime,
        Msg::SettingsServer,
        Msg::SettingsServerUrl,
        Msg::SettingsServerUrlDesc,
        Msg::SettingsAccount,
        Msg::SettingsAccountStatus,
        Msg::SettingsAccountStatusDesc,
        Msg::SettingsInterface,
        Msg::SettingsLanguage,
        Msg::SettingsLanguageDesc,
        Msg::SettingsTheme,
        Msg::SettingsThemeDesc,
        Msg::SettingsPageSize,
        Msg::SettingsPageSizeDesc,
        Msg::SettingsDebounce,
        Msg::SettingsDebounceDesc,
        Msg::SettingsSaved,
        Msg::HelpTitle,
    ];
}

/// Resolve `msg` in `lang`, falling back to Chinese for untranslated keys.
pub fn text(lang: Lang, msg: Msg) -> &'static str {
    match lang {
        Lang::En => {
            let s = en(msg);
            if s.is_empty() { zh(msg) } else { s }
        }
        Lang::Zh => zh(msg),
    }
}

fn en(msg: Msg) -> &'static str {
    match msg {
        Msg::Loading => "Loading...",
        Msg::NoMoreContent => "No more content",
        Msg::NoResults => "No prompts found",
        Msg::Search => "Search",
        Msg::SearchPrompts => "Search prompts...",
        Msg::Cancel => "Cancel",
        Msg::Close => "Close",
        Msg::Upload => "Upload",
        Msg::Download => "Download",

        Msg::TabPrompts => "Prompts",
        Msg::TabMyPrompts => "My Prompts",
        Msg::TabFiles => "Files",
        Msg::TabSettings => "Settings",
        Msg::Login => "Login",
        Msg::Logout => "Logout",

        Msg::LoginTitle => "Login",
        Msg::Username => "Username",
        Msg::Password => "Password",
        Msg::LoginButton => "Login",
        Msg::LoginFailed => "Login failed, please check username or password",
        Msg::RegisterTitle => "Register",
        Msg::RegisterButton => "Register",
        Msg::RegisterSuccess => "Registration successful",
        Msg::RegisterFailed => "Registration failed, username may already exist",
        Msg::AlreadyHaveAccount => "Already have an account?",
        Msg::GoToLogin => "Go to login",
        Msg::NotLoggedIn => "(not logged in)",
        Msg::LoginRequired => "Please log in first",

        Msg::PromptDetails => "Prompt Details",
        Msg::Author => "Author",
        Msg::Source => "Source",
        Msg::EffectImages => "Effect Images",
        Msg::ImageUrlNotProvided => "Image URL not provided",

        Msg::CreatePrompt => "Create Prompt",
        Msg::EditPrompt => "Edit Prompt",
        Msg::PromptTitle => "Title",
        Msg::PromptContent => "Content",
        Msg::PromptTags => "Tags",
        Msg::PromptSourceUrl => "Source URL",
        Msg::PromptSourceBy => "Source Author",
        Msg::PromptSourceTags => "Source Tags",
        Msg::AddImage => "Add Image",
        Msg::ImageTags => "Image Tags",
        Msg::SaveChanges => "Save Changes",
        Msg::PromptCreateSuccess => "Prompt created successfully",
        Msg::PromptCreateFailed => "Failed to create prompt",
        Msg::PromptUpdateSuccess => "Prompt updated successfully",
        Msg::PromptUpdateFailed => "Failed to update prompt",

        Msg::FileManagement => "File Management",
        Msg::UploadFile => "Upload File",
        Msg::FileUploadSuccess => "File uploaded successfully",
        Msg::FileUploadFailed => "File upload failed",
        Msg::FileDownloadSuccess => "File downloaded",
        Msg::FileDownloadFailed => "File download failed",
        Msg::NoFiles => "No files available",
        Msg::NoMoreFiles => "No more files",
        Msg::FileName => "Name",
        Msg::FileSize => "Size",
        Msg::FileTime => "Time",

        Msg::SettingsServer => "Server",
        Msg::SettingsServerUrl => "Server URL",
        Msg::SettingsServerUrlDesc => "Base URL of the prompt-sharing server",
        Msg::SettingsAccount => "Account",
        Msg::SettingsAccountStatus => "Status",
        Msg::SettingsAccountStatusDesc => "Press Enter to log in or out",
        Msg::SettingsInterface => "Interface",
        Msg::SettingsLanguage => "Language",
        Msg::SettingsLanguageDesc => "Catalog language for labels and messages",
        Msg::SettingsTheme => "Theme",
        Msg::SettingsThemeDesc => "Dark or light color palette",
        Msg::SettingsPageSize => "Page Size",
        Msg::SettingsPageSizeDesc => "Items fetched per page in the lists",
        Msg::SettingsDebounce => "Search Debounce (ms)",
        Msg::SettingsDebounceDesc => "Quiet period before a search fires",
        Msg::SettingsSaved => "Settings saved",

        Msg::HelpTitle => "Help",
    }
}

fn zh(msg: Msg) -> &'static str {
    match msg {
        Msg::Loading => "加载中...",
        Msg::NoMoreContent => "没有更多内容了",
        Msg::NoResults => "没有找到相关提示词",
        Msg::Search => "搜索",
        Msg::SearchPrompts => "搜索提示词...",
        Msg::Cancel => "取消",
        Msg::Close => "关闭",
        Msg::Upload => "上传",
        Msg::Download => "下载",

        Msg::TabPrompts => "提示词",
        Msg::TabMyPrompts => "我的提示词",
        Msg::TabFiles => "文件管理",
        Msg::TabSettings => "设置",
        Msg::Login => "登录",
        Msg::Logout => "登出",

        Msg::LoginTitle => "登录",
        Msg::Username => "用户名",
        Msg::Password => "密码",
        Msg::LoginButton => "登录",
        Msg::LoginFailed => "登录失败，请检查用户名或密码",
        Msg::RegisterTitle => "注册",
        Msg::RegisterButton => "注册",
        Msg::RegisterSuccess => "注册成功",
        Msg::RegisterFailed => "注册失败，用户名可能已存在",
        Msg::AlreadyHaveAccount => "已有账号？",
        Msg::GoToLogin => "去登录",
        Msg::NotLoggedIn => "未登录",
        Msg::LoginRequired => "请先登录",

        Msg::PromptDetails => "提示词详情",
        Msg::Author => "作者",
        Msg::Source => "来源",
        Msg::EffectImages => "效果图片",
        Msg::ImageUrlNotProvided => "图片URL未提供",

        Msg::CreatePrompt => "创建提示词",
        Msg::EditPrompt => "编辑提示词",
        Msg::PromptTitle => "标题",
        Msg::PromptContent => "内容",
        Msg::PromptTags => "标签",
        Msg::PromptSourceUrl => "来源链接",
        Msg::PromptSourceBy => "来源作者",
        Msg::PromptSourceTags => "来源标签",
        Msg::AddImage => "添加图片",
        Msg::ImageTags => "图片标签",
        Msg::SaveChanges => "保存修改",
        Msg::PromptCreateSuccess => "提示词创建成功",
        Msg::PromptCreateFailed => "提示词创建失败",
        Msg::PromptUpdateSuccess => "提示词更新成功",
        Msg::PromptUpdateFailed => "提示词更新失败",

        Msg::FileManagement => "文件管理",
        Msg::UploadFile => "上传文件",
        Msg::FileUploadSuccess => "文件上传成功",
        Msg::FileUploadFailed => "文件上传失败",
        Msg::FileDownloadSuccess => "文件下载成功",
        Msg::FileDownloadFailed => "文件下载失败",
        Msg::NoFiles => "暂无文件",
        Msg::NoMoreFiles => "没有更多文件了",
        Msg::FileName => "文件名",
        Msg::FileSize => "大小",
        Msg::FileTime => "时间",

        Msg::SettingsServer => "服务器",
        Msg::SettingsServerUrl => "服务器地址",
        Msg::SettingsServerUrlDesc => "提示词服务的基础地址",
        Msg::SettingsAccount => "账户",
        Msg::SettingsAccountStatus => "状态",
        Msg::SettingsAccountStatusDesc => "回车登录或登出",
        Msg::SettingsInterface => "界面",
        Msg::SettingsLanguage => "语言",
        Msg::SettingsLanguageDesc => "界面与消息使用的语言",
        Msg::SettingsTheme => "主题",
        Msg::SettingsThemeDesc => "暗色或亮色配色",
        Msg::SettingsPageSize => "每页数量",
        Msg::SettingsPageSizeDesc => "列表每页请求的条数",
        Msg::SettingsDebounce => "搜索防抖(毫秒)",
        Msg::SettingsDebounceDesc => "停止输入多久后触发搜索",
        Msg::SettingsSaved => "设置已保存",

        Msg::HelpTitle => "帮助",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_resolves_non_empty_in_both_languages() {
        for &msg in Msg::ALL {
            assert!(!text(Lang::En, msg).is_empty(), "missing en: {msg:?}");
            assert!(!text(Lang::Zh, msg).is_empty(), "missing zh: {msg:?}");
        }
    }

    #[test]
    fn catalog_matches_original_wording() {
        assert_eq!(text(Lang::En, Msg::NoMoreContent), "No more content");
        assert_eq!(text(Lang::Zh, Msg::NoMoreContent), "没有更多内容了");
        assert_eq!(text(Lang::Zh, Msg::SearchPrompts), "搜索提示词...");
    }
}

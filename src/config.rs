use log::Level;

#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3000"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Production URL
}

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const CONTACT_PATH: &str = "/api/contact";

/// Delay between un-hiding the menu panel and sliding its content in, so the
/// transition starts from the off-screen position.
pub const MENU_OPEN_DELAY_MS: u32 = 10;
/// Must match the CSS transition on `.mobile-menu-content`.
pub const MENU_TRANSITION_MS: u32 = 300;
pub const SLIDE_INTERVAL_MS: u32 = 5_000;
pub const REVEAL_AFTER_SCROLL_MS: u32 = 300;
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Used when the page has no `<header>` to measure.
pub const DEFAULT_HEADER_OFFSET: f64 = 70.0;

pub mod ids {
    pub const MENU_BUTTON: &str = "mobile-menu-button";
    pub const MENU_PANEL: &str = "mobile-menu";
    pub const MENU_CLOSE: &str = "close-menu";
    pub const MAIN_VIEW: &str = "main-content";
    pub const EVENTS_VIEW: &str = "all-events";
    pub const HERO_SLIDES: &str = "hero-slides";
    pub const CONTACT_FORM: &str = "contactForm";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const MESSAGE: &str = "message";
    pub const AGREE: &str = "agree";
    pub const FORM_STATUS: &str = "form-status";
}

pub mod selectors {
    pub const MENU_CONTENT: &str = ".mobile-menu-content";
    pub const MENU_LINKS: &str = "nav a";
    pub const FRAGMENT_LINKS: &str = "a[href^=\"#\"]";
    pub const FILTER_CONTROLS: &str = ".event-filter[data-category]";
    pub const EVENT_CARDS: &str = ".event-card[data-category]";
    pub const REVEAL: &str = ".reveal";
    pub const HERO_SLIDE: &str = ".hero-slide";
    pub const HEADER: &str = "header";
    pub const SUBMIT: &str = "[type=\"submit\"]";
}

pub mod classes {
    pub const HIDDEN: &str = "hidden";
    pub const SLID_OUT: &str = "-translate-x-full";
    pub const ACTIVE: &str = "active";
    pub const REVEALED: &str = "visible";
    pub const FIELD_ERROR: &str = "border-red-500";
    pub const FIELD_DEFAULT: &str = "border-gray-300";
    pub const LABEL_ERROR: &str = "text-red-500";
    pub const STATUS_SUCCESS: &str = "text-green-600";
    pub const STATUS_ERROR: &str = "text-red-600";
}

pub const CATEGORY_ATTR: &str = "data-category";
pub const ALL_CATEGORY: &str = "all";
pub const EVENTS_FRAGMENT: &str = "#all-events";

pub mod messages {
    pub const NAME_REQUIRED: &str = "Vui lòng nhập họ tên.";
    pub const EMAIL_REQUIRED: &str = "Vui lòng nhập email.";
    pub const EMAIL_INVALID: &str = "Email không hợp lệ.";
    pub const MESSAGE_REQUIRED: &str = "Vui lòng nhập lời nhắn.";
    pub const AGREE_REQUIRED: &str = "Vui lòng đồng ý với điều khoản.";
    pub const SUBMIT_SUCCESS: &str =
        "Cảm ơn bạn đã gửi thông tin! Chúng tôi sẽ liên hệ với bạn sớm nhất.";
    pub const SUBMIT_FAILED: &str = "Gửi thông tin thất bại. Vui lòng thử lại sau.";
    pub const SUBMITTING_LABEL: &str = "Đang gửi...";
}

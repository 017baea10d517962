use chrono::NaiveDate;

use tuition_models::{NavigationEntry, SessionUser, ShellQuery, ShellView, SidebarFooter};

use crate::utils::format::format_header_date;

pub const APP_TITLE: &str = "Tuition Manager";
pub const APP_TAGLINE: &str = "Coaching Institute";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

pub const NAVIGATION: [NavItem; 7] = [
    NavItem { name: "Dashboard", href: "/" },
    NavItem { name: "Students", href: "/students" },
    NavItem { name: "Teachers", href: "/teachers" },
    NavItem { name: "Classes", href: "/classes" },
    NavItem { name: "Fees", href: "/fees" },
    NavItem { name: "Reports", href: "/reports" },
    NavItem { name: "Settings", href: "/settings" },
];

/// `/` matches only itself; every other entry matches by prefix.
pub fn is_active(href: &str, current_path: &str) -> bool {
    if href == "/" {
        current_path == "/"
    } else {
        current_path.starts_with(href)
    }
}

pub fn navigation_for(current_path: &str) -> Vec<NavigationEntry> {
    NAVIGATION
        .iter()
        .map(|item| NavigationEntry {
            name: item.name.to_string(),
            href: item.href.to_string(),
            active: is_active(item.href, current_path),
        })
        .collect()
}

/// Builds the frame around every protected view. A collapsed sidebar keeps
/// the navigation but drops the tagline and the user footer.
pub fn build_shell_view(user: &SessionUser, query: &ShellQuery, today: NaiveDate) -> ShellView {
    let sidebar = query.sidebar.unwrap_or_default();
    let path = query.path.as_deref().unwrap_or("/");
    let expanded = sidebar.is_expanded();

    ShellView {
        title: APP_TITLE.to_string(),
        tagline: expanded.then(|| APP_TAGLINE.to_string()),
        sidebar,
        navigation: navigation_for(path),
        footer: expanded.then(|| SidebarFooter {
            email: user.email.clone(),
            role: user.effective_role(),
        }),
        today: format_header_date(today),
    }
}

//! Centralized link creation so every response names its relations the
//! same way.

use service::pagination::PageInfo;

use crate::http::envelope::Link;

pub const USERS_PATH: &str = "/api/users";

fn page_href(page: u64, size: u64) -> String {
    format!("{}?page={}&size={}", USERS_PATH, page, size)
}

/// Standard links for a single user resource.
pub fn for_user(id: i64) -> Vec<Link> {
    vec![
        Link::new("self", format!("{}/{}", USERS_PATH, id)),
        Link::new("users", USERS_PATH),
    ]
}

/// Standard links for the users collection.
pub fn for_users() -> Vec<Link> {
    vec![
        Link::new("self", USERS_PATH),
        Link::new("create", USERS_PATH),
    ]
}

/// Navigation links for a paginated collection: self, first, prev/next when
/// they exist, last, create.
pub fn for_paginated(info: &PageInfo) -> Vec<Link> {
    let last_page = info.total_pages.saturating_sub(1);
    let mut links = vec![
        Link::new("self", page_href(info.page, info.size)),
        Link::new("first", page_href(0, info.size)),
    ];
    if info.has_prev() {
        links.push(Link::new("prev", page_href(info.page - 1, info.size)));
    }
    if info.has_next() {
        links.push(Link::new("next", page_href(info.page + 1, info.size)));
    }
    links.push(Link::new("last", page_href(last_page, info.size)));
    links.push(Link::new("create", USERS_PATH.to_string()));
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rels(links: &[Link]) -> Vec<&str> {
        links.iter().map(|l| l.rel.as_str()).collect()
    }

    #[test]
    fn user_links() {
        let links = for_user(42);
        assert_eq!(links[0].href, "/api/users/42");
        assert_eq!(rels(&links), vec!["self", "users"]);
    }

    #[test]
    fn middle_page_has_prev_and_next() {
        let info = PageInfo::new(2, 10, 45, 5);
        let links = for_paginated(&info);
        assert_eq!(rels(&links), vec!["self", "first", "prev", "next", "last", "create"]);
        assert!(links.iter().any(|l| l.rel == "next" && l.href == "/api/users?page=3&size=10"));
        assert!(links.iter().any(|l| l.rel == "last" && l.href == "/api/users?page=4&size=10"));
    }

    #[test]
    fn first_page_omits_prev() {
        let info = PageInfo::new(0, 10, 45, 5);
        let links = for_paginated(&info);
        assert_eq!(rels(&links), vec!["self", "first", "next", "last", "create"]);
    }

    #[test]
    fn single_page_omits_prev_and_next() {
        let info = PageInfo::new(0, 10, 3, 1);
        let links = for_paginated(&info);
        assert_eq!(rels(&links), vec!["self", "first", "last", "create"]);
    }

    #[test]
    fn empty_result_still_links_sanely() {
        let info = PageInfo::new(0, 10, 0, 0);
        let links = for_paginated(&info);
        assert_eq!(rels(&links), vec!["self", "first", "last", "create"]);
        assert!(links.iter().any(|l| l.rel == "last" && l.href == "/api/users?page=0&size=10"));
    }
}

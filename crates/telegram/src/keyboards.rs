//! Inline keyboard builders for interactive bot menus

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Callback payload that shows the category list
pub const CATEGORIES_CALLBACK: &str = "categories";

/// Callback payload opening the first page of a category
pub fn category_callback(category: &str) -> String {
    format!("category:{}", category)
}

/// Callback payload opening a given page of a category
pub fn links_page_callback(category: &str, page: u64) -> String {
    format!("links:{}:{}", page, category)
}

/// Keyboard attached to the /start message
pub fn start_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::switch_inline_query_current_chat("Search Here", ""),
        InlineKeyboardButton::switch_inline_query("Go Inline", ""),
        InlineKeyboardButton::callback("Get Links", CATEGORIES_CALLBACK),
    ]])
}

/// One button per category, each opening that category's links
pub fn category_keyboard<'a, I>(categories: I) -> InlineKeyboardMarkup
where
    I: IntoIterator<Item = &'a String>,
{
    let buttons = categories
        .into_iter()
        .map(|category| {
            vec![InlineKeyboardButton::callback(
                category.clone(),
                category_callback(category),
            )]
        })
        .collect::<Vec<_>>();

    InlineKeyboardMarkup::new(buttons)
}

/// Navigation under a page of links
///
/// # Arguments
/// * `category` - Category being browsed
/// * `page` - Current page number (0-indexed)
/// * `has_next` - Whether the current page came back full
pub fn links_keyboard(category: &str, page: u64, has_next: bool) -> InlineKeyboardMarkup {
    let mut buttons = vec![];

    let mut nav_row = vec![];
    if page > 0 {
        nav_row.push(InlineKeyboardButton::callback(
            "⬅️ Previous",
            links_page_callback(category, page - 1),
        ));
    }
    if has_next {
        nav_row.push(InlineKeyboardButton::callback(
            "Next ➡️",
            links_page_callback(category, page + 1),
        ));
    }
    if !nav_row.is_empty() {
        buttons.push(nav_row);
    }

    buttons.push(vec![InlineKeyboardButton::callback(
        "Back",
        CATEGORIES_CALLBACK,
    )]);

    InlineKeyboardMarkup::new(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(button: &InlineKeyboardButton) -> &str {
        match &button.kind {
            InlineKeyboardButtonKind::CallbackData(data) => data.as_str(),
            other => panic!("expected callback button, got {:?}", other),
        }
    }

    #[test]
    fn test_start_keyboard() {
        let keyboard = start_keyboard();
        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(keyboard.inline_keyboard[0].len(), 3);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][2]), "categories");
    }

    #[test]
    fn test_category_keyboard() {
        let categories = vec!["cat1".to_string(), "cat2".to_string()];
        let keyboard = category_keyboard(&categories);

        assert_eq!(keyboard.inline_keyboard.len(), 2); // one row per category
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "category:cat1");
        assert_eq!(keyboard.inline_keyboard[1][0].text, "cat2");
    }

    #[test]
    fn test_links_keyboard_first_page() {
        // Single short page - only Back
        let keyboard = links_keyboard("cat1", 0, false);
        assert_eq!(keyboard.inline_keyboard.len(), 1);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "categories");

        // Full first page - Next + Back
        let keyboard = links_keyboard("cat1", 0, true);
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "links:1:cat1");
    }

    #[test]
    fn test_links_keyboard_middle_page() {
        let keyboard = links_keyboard("cat1", 2, true);
        assert_eq!(keyboard.inline_keyboard[0].len(), 2); // Previous + Next
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][0]), "links:1:cat1");
        assert_eq!(callback_data(&keyboard.inline_keyboard[0][1]), "links:3:cat1");
    }

    #[test]
    fn test_callback_data_fits_limit() {
        let category = "c".repeat(crate::constants::MAX_CATEGORY_LEN);
        assert!(links_page_callback(&category, 9999).len() <= crate::constants::MAX_CALLBACK_DATA_LEN);
        assert!(category_callback(&category).len() <= crate::constants::MAX_CALLBACK_DATA_LEN);
    }
}

//! UI Builder module for creating the banner keyboard

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::content::MenuDefinition;

/// Create the inline menu keyboard, one button per row in declared order
pub fn create_menu_keyboard(menu: &MenuDefinition) -> InlineKeyboardMarkup {
    let buttons: Vec<Vec<InlineKeyboardButton>> = menu
        .entries()
        .iter()
        .map(|entry| {
            vec![InlineKeyboardButton::callback(
                entry.label.clone(),
                entry.action_key.clone(),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(buttons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MenuEntry;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_one_button_per_row_in_order() {
        let menu = MenuDefinition::new(vec![
            MenuEntry {
                label: "Our services".to_string(),
                action_key: "services".to_string(),
            },
            MenuEntry {
                label: "Contact us".to_string(),
                action_key: "contact".to_string(),
            },
        ]);

        let keyboard = create_menu_keyboard(&menu);

        assert_eq!(keyboard.inline_keyboard.len(), 2);
        for (row, entry) in keyboard.inline_keyboard.iter().zip(menu.entries()) {
            assert_eq!(row.len(), 1);
            assert_eq!(row[0].text, entry.label);
            assert_eq!(
                row[0].kind,
                InlineKeyboardButtonKind::CallbackData(entry.action_key.clone())
            );
        }
    }

    #[test]
    fn test_empty_menu() {
        let keyboard = create_menu_keyboard(&MenuDefinition::default());
        assert!(keyboard.inline_keyboard.is_empty());
    }
}

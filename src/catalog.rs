// Built-in menu catalog and the request bodies derived from it.
//
// The tables are plain `static` slices: nothing here is mutated at
// runtime, and the seeder only needs to walk them in order.

use serde::Serialize;

/// One row of the category table.
#[derive(Debug, Clone, Copy)]
pub struct CategorySeed {
    pub name: &'static str,
    pub description: &'static str,
    pub display_order: i32,
    pub is_active: bool,
}

/// One row of the menu item table. The owning category is given by the
/// enclosing `MenuSection`.
#[derive(Debug, Clone, Copy)]
pub struct MenuItemSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub price: f64,
}

/// Items grouped under a category name.
#[derive(Debug, Clone, Copy)]
pub struct MenuSection {
    pub category: &'static str,
    pub items: &'static [MenuItemSeed],
}

const fn category(name: &'static str, description: &'static str, display_order: i32) -> CategorySeed {
    CategorySeed { name, description, display_order, is_active: true }
}

const fn item(name: &'static str, description: &'static str, price: f64) -> MenuItemSeed {
    MenuItemSeed { name, description, price }
}

pub static CATEGORIES: &[CategorySeed] = &[
    category("Sandwiches", "Fresh sandwiches made to order", 1),
    category("Salads", "Healthy salads with fresh ingredients", 2),
    category("Pizza", "Hand-tossed pizzas with premium toppings", 3),
    category("Burgers", "Juicy burgers with quality beef", 4),
    category("Bowls", "Nutritious bowl meals", 5),
    category("Desserts", "Sweet treats and desserts", 6),
    category("Drinks", "Refreshing beverages", 7),
];

pub static MENU_ITEMS: &[MenuSection] = &[
    MenuSection {
        category: "Sandwiches",
        items: &[
            item("Grilled Chicken Sandwich", "Juicy grilled chicken with fresh vegetables and house sauce", 8.99),
            item("Club Sandwich", "Triple-decker with turkey, bacon, lettuce and tomato", 10.49),
            item("BLT Sandwich", "Crispy bacon, lettuce, tomato on toasted bread", 7.99),
        ],
    },
    MenuSection {
        category: "Salads",
        items: &[
            item("Caesar Salad", "Fresh romaine lettuce with parmesan and homemade dressing", 6.99),
            item("Greek Salad", "Feta cheese, olives, cucumber, tomatoes with olive oil", 7.49),
            item("Cobb Salad", "Mixed greens with chicken, egg, bacon, avocado", 9.49),
        ],
    },
    MenuSection {
        category: "Pizza",
        items: &[
            item("Margherita Pizza", "Classic pizza with fresh mozzarella and basil", 11.99),
            item("Pepperoni Pizza", "Classic pepperoni with mozzarella cheese", 12.99),
            item("Veggie Pizza", "Bell peppers, mushrooms, onions, olives", 11.49),
        ],
    },
    MenuSection {
        category: "Burgers",
        items: &[
            item("Cheeseburger", "Angus beef patty with cheese, lettuce, tomato", 9.99),
            item("Bacon Burger", "Beef patty with crispy bacon and BBQ sauce", 11.49),
            item("Mushroom Swiss Burger", "Sautéed mushrooms and swiss cheese", 10.99),
        ],
    },
    MenuSection {
        category: "Bowls",
        items: &[
            item("Veggie Bowl", "Quinoa with roasted vegetables and tahini dressing", 7.99),
            item("Teriyaki Bowl", "Chicken teriyaki over rice with steamed vegetables", 9.99),
            item("Poke Bowl", "Fresh ahi tuna with rice, edamame, and wasabi mayo", 12.99),
            item("Smoothie Bowl", "Acai berry smoothie topped with granola and fresh fruit", 8.49),
        ],
    },
    MenuSection {
        category: "Desserts",
        items: &[
            item("Chocolate Chip Cookie", "Freshly baked with premium chocolate chips", 2.99),
            item("Brownie Sundae", "Warm brownie with vanilla ice cream and chocolate sauce", 5.99),
            item("Cheesecake Slice", "New York style cheesecake with berry compote", 4.99),
        ],
    },
    MenuSection {
        category: "Drinks",
        items: &[
            item("Fresh Lemonade", "Freshly squeezed lemons with a hint of mint", 3.49),
            item("Iced Coffee", "Cold brew coffee with your choice of milk", 4.49),
            item("Green Juice", "Kale, spinach, apple, cucumber, lemon", 5.99),
        ],
    },
];

/// Total number of items across all sections.
pub fn item_count() -> usize {
    MENU_ITEMS.iter().map(|s| s.items.len()).sum()
}

/// Body for `POST /categories`. Field names follow the backend's
/// camelCase JSON convention.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub display_order: i32,
    pub is_active: bool,
}

impl From<&CategorySeed> for NewCategory {
    fn from(seed: &CategorySeed) -> Self {
        NewCategory {
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            display_order: seed.display_order,
            is_active: seed.is_active,
        }
    }
}

/// Body for `POST /menuitems`. `components` is always serialized as
/// `null`; the backend accepts a free-form JSON document there but the
/// built-in catalog never fills it.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub category_id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub available: bool,
    pub components: Option<serde_json::Value>,
}

impl NewMenuItem {
    pub fn new(category_id: &str, seed: &MenuItemSeed, currency: &str) -> Self {
        NewMenuItem {
            category_id: category_id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: seed.price,
            currency: currency.to_string(),
            available: true,
            components: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn category_names_are_unique() {
        let names: HashSet<_> = CATEGORIES.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), CATEGORIES.len());
    }

    #[test]
    fn every_section_names_a_known_category() {
        for section in MENU_ITEMS {
            assert!(
                CATEGORIES.iter().any(|c| c.name == section.category),
                "unknown category {}",
                section.category
            );
        }
    }

    #[test]
    fn display_order_follows_table_order() {
        let orders: Vec<i32> = CATEGORIES.iter().map(|c| c.display_order).collect();
        assert_eq!(orders, (1..=7).collect::<Vec<_>>());
        assert!(CATEGORIES.iter().all(|c| c.is_active));
    }

    #[test]
    fn catalog_has_twenty_two_items() {
        assert_eq!(item_count(), 22);
        let bowls = MENU_ITEMS.iter().find(|s| s.category == "Bowls").unwrap();
        assert_eq!(bowls.items.len(), 4);
    }

    #[test]
    fn category_body_uses_camel_case() {
        let body = serde_json::to_value(NewCategory::from(&CATEGORIES[0])).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Sandwiches",
                "description": "Fresh sandwiches made to order",
                "displayOrder": 1,
                "isActive": true
            })
        );
    }

    #[test]
    fn menu_item_body_sends_null_components() {
        let seed = MENU_ITEMS[0].items[0];
        let body = serde_json::to_value(NewMenuItem::new("cat-1", &seed, "ron")).unwrap();
        assert_eq!(body["categoryId"], "cat-1");
        assert_eq!(body["price"], json!(8.99));
        assert_eq!(body["currency"], "ron");
        assert_eq!(body["available"], true);
        assert!(body["components"].is_null());
    }
}

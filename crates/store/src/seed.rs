//! Built-in restaurant list loaded ahead of user records.

use bitelist_model::{rating_stars, Restaurant};

// (id, name, cuisine, must try, location, stars)
static SEED: &[(u64, &str, &str, &str, &str, u8)] = &[
    (1, "A2B", "Indian 🍛", "Dosas, Chicku shake", "A2B Indian Vegetarian Restaurant - Virginia", 3),
    (2, "Agora Tysons Mediterranean Restaurant", "Mediterranean 🥙", "Ottoman Rice, Grilled Chicken", "Agora Tysons Mediterranean Restaurant", 5),
    (3, "AMBAR Restaurant, Clarendon", "Balkan 🥘", "", "AMBAR Restaurant, Clarendon", 4),
    (4, "Ashburn Kaboob", "Mediterranean 🥙", "Kaboob Platters, Spinach side", "Ashburn Kabob", 3),
    (5, "Biryani Grill", "Indian 🍛", "", "Biryani Grill", 4),
    (6, "Calabash African cuisine and Bar", "Ghanaian 🍲", "Jollof rice , waakye, fufu & Peanut soup , Light soup , fried plantains", "Calabash African Cuisine & Bar", 4),
    (7, "Celebration by Rupa Vira", "Indian 🍛", "Celebration Special dessert, Bluberry Pani Puri, Goat Biryani, Goat Curry", "Celebration by Rupa Vira - Modern Indian Cuisine", 4),
    (8, "CHA Street Food (Sterling)", "Pakistani 🍛", "", "CHA Street Food (Sterling)", 3),
    (9, "Chatwala", "Indian 🍛", "Indian street food (aloo tikki chat, pani puri, vada pav etc)", "Chaatwala", 5),
    (10, "Chateau de Chantily", "Dessert 🍰, Coffee ☕", "", "Chateau de Chantilly Cafe", 4),
    (11, "Dolan Uyghur Restaurant", "Chinese 🥡, Turkish 🌯", "", "Dolan Uyghur Restaurant", 4),
    (12, "Elmina", "Ghanaian 🍲", "Jollof rice", "Elmina", 3),
    (13, "Filli cafe", "Other 🍽️", "", "FiLLi Cafe | Chantilly - Virginia", 0),
    (14, "Fogo de Chão Brazilian Steakhouse", "Other 🍽️", "", "Fogo de Chão Brazilian Steakhouse", 4),
    (15, "Genki izakaya", "Japanese 🍣", "", "Genki Izakaya 元気", 0),
    (16, "GORDON RAMSAY HELL'S KITCHEN", "Other 🍽️", "", "GORDON RAMSAY HELL'S KITCHEN", 4),
    (17, "Jodhpur", "Indian 🍛", "", "Jodhpur", 3),
    (18, "Kaboob Nook", "Mediterranean 🥙", "Kaboob Platters, Spinach side", "Kabob Nook", 3),
    (19, "Kakatiya Kitchen", "Indian 🍛", "Chicken Noodles, Goat Biryani", "Kakatiya Kitchen", 3),
    (20, "Krispy Krunchy Chicken", "Indian 🍛", "Momos are fresh made to order", "Krispy Krunchy Chicken", 0),
    (21, "Mama Cheng ", "Chinese 🥡", "", "Mama Chang", 0),
    (22, "Melt Gourmet Cheeseburgers", "American 🍔", "", "Melt Gourmet Cheeseburgers", 3),
    (23, "Milk & Honey Southern Inspired Kitchen", "Other 🍽️", "", "Milk & Honey Southern Inspired Kitchen", 3),
    (24, "Nandos Peri Peri", "Portuguese 🍖", "Chicken, Garlic Bread and Mash is delicious", "Nando's PERi-PERi", 4),
    (25, "Ocean Crab", "Southern 🍗", "Cajun Boil", "Ocean Crab", 4),
    (26, "Paradise biryani pointe", "Indian 🍛", "", "Paradise Biryani Pointe", 0),
    (27, "peter chang", "Other 🍽️", "", "Peter Chang Herndon", 0),
    (28, "Phở 75", "Other 🍽️", "", "Phở 75", 3),
    (29, "Succotash", "Southern 🍗", "Dirty fried chicken , Apple cider BBQ ribs, Nashville Hot fried oysters", "SUCCOTASH", 4),
    (30, "Tava Fry Modern Indian Bar & Restaurant", "Indian 🍛", "", "Tava Fry Modern Indian Bar & Restaurant", 3),
    (31, "Tilly Kitchen Food Hall", "Other 🍽️", "", "Tilly Kitchen Food Hall", 3),
    (32, "Toosso", "Pakistani 🍛", "CHICKEN TIKKA SPECIAL, Falooda", "Toosso", 4),
    (33, "Tous Les Jours", "Coffee ☕, Dessert 🍰", "", "Tous Les Jours Bakery Cafe", 4),
    (34, "Turmerica By Tanvi Modi", "Indian 🍛", "Vada Paav, Thalis", "Turmerica By Tanvi Modi", 3),
    (35, "ugly dumpling", "Other 🍽️", "", "Ugly Dumpling", 0),
];

/// A fresh copy of the seed records, in id order.
pub fn seed_restaurants() -> Vec<Restaurant> {
    SEED.iter()
        .map(|&(id, name, cuisine, must_try, location, stars)| Restaurant {
            id,
            name: name.to_string(),
            cuisine: cuisine.to_string(),
            must_try: must_try.to_string(),
            location: Some(location.to_string()),
            link: None,
            rating: rating_stars(stars),
        })
        .collect()
}

//! Built-in location registry: towns of the Pomeranian voivodeship with
//! their marker positions on the regional map.

use crate::types::Location;

pub fn default_locations() -> Vec<Location> {
    vec![
        Location::new("Gdańsk", 54.35, 18.64, 67, 43),
        Location::new("Malbork", 54.03, 19.03, 82, 66),
        Location::new("Łeba", 54.77, 17.56, 35, 22),
        Location::new("Bytów", 54.17, 17.49, 25, 55),
        Location::new("Chojnice", 53.70, 17.57, 31, 78),
        Location::new("Człuchów", 53.66, 17.36, 20, 82),
        Location::new("Hel", 54.61, 18.80, 72, 32),
        Location::new("Kartuzy", 54.33, 18.20, 52, 48),
        Location::new("Kościerzyna", 54.12, 17.98, 40, 59),
        Location::new("Kwidzyn", 53.73, 18.93, 76, 78),
        Location::new("Lębork", 54.54, 17.75, 38, 35),
        Location::new("Nowy Dwór Gdański", 54.22, 19.12, 83, 53),
        Location::new("Puck", 54.72, 18.41, 59, 23),
        Location::new("Słupsk", 54.46, 17.03, 15, 47),
        Location::new("Starogard Gdański", 53.97, 18.53, 65, 65),
        Location::new("Tczew", 54.09, 18.78, 68, 53),
        Location::new("Ustka", 54.58, 16.86, 10, 33),
        Location::new("Wejherowo", 54.61, 18.23, 50, 32),
    ]
}

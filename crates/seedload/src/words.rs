//! Fixed vocabularies sampled by the record generator.
//!
//! The lists are part of the determinism contract: reordering or editing them
//! changes the values produced for a given seed.

pub const FIRST_NAMES: &[&str] = &[
    "Aaliyah", "Aaron", "Abigail", "Adam", "Adrian", "Aiden", "Alexa", "Alexander", "Alice",
    "Amelia", "Andrea", "Andrew", "Angela", "Anna", "Anthony", "Aria", "Ashley", "Austin",
    "Benjamin", "Brandon", "Brian", "Brooke", "Caleb", "Cameron", "Carlos", "Caroline",
    "Charles", "Charlotte", "Chloe", "Christian", "Christopher", "Claire", "Daniel", "David",
    "Diana", "Dylan", "Elena", "Elijah", "Elizabeth", "Ella", "Emily", "Emma", "Eric", "Ethan",
    "Evelyn", "Gabriel", "Grace", "Hannah", "Harper", "Henry", "Isaac", "Isabella", "Jack",
    "Jacob", "James", "Jasmine", "Jason", "Jennifer", "Jessica", "John", "Jonathan", "Jordan",
    "Joseph", "Joshua", "Julia", "Justin", "Kayla", "Kevin", "Laura", "Lauren", "Leah", "Liam",
    "Lily", "Logan", "Lucas", "Lucy", "Madison", "Maria", "Mason", "Matthew", "Maya", "Megan",
    "Mia", "Michael", "Natalie", "Nathan", "Nicholas", "Noah", "Olivia", "Owen", "Paige",
    "Patrick", "Rachel", "Rebecca", "Robert", "Ryan", "Samantha", "Samuel", "Sarah", "Sofia",
    "Sophie", "Stephanie", "Taylor", "Thomas", "Tyler", "Victoria", "William", "Zoe",
];

pub const LAST_NAMES: &[&str] = &[
    "Adams", "Alexander", "Allen", "Anderson", "Bailey", "Baker", "Barnes", "Bell", "Bennett",
    "Brooks", "Brown", "Bryant", "Butler", "Campbell", "Carter", "Clark", "Coleman", "Collins",
    "Cook", "Cooper", "Cox", "Davis", "Diaz", "Edwards", "Evans", "Fisher", "Flores", "Foster",
    "Garcia", "Gomez", "Gonzalez", "Gray", "Green", "Griffin", "Hall", "Harris", "Hayes",
    "Henderson", "Hernandez", "Hill", "Howard", "Hughes", "Jackson", "James", "Jenkins",
    "Johnson", "Jones", "Kelly", "King", "Lee", "Lewis", "Long", "Lopez", "Martin", "Martinez",
    "Miller", "Mitchell", "Moore", "Morgan", "Morris", "Murphy", "Myers", "Nelson", "Nguyen",
    "O'Brien", "Ortiz", "Parker", "Patterson", "Perez", "Perry", "Peterson", "Phillips",
    "Powell", "Price", "Ramirez", "Reed", "Reyes", "Richardson", "Rivera", "Roberts",
    "Robinson", "Rodriguez", "Rogers", "Ross", "Russell", "Sanchez", "Sanders", "Scott",
    "Simmons", "Smith", "Stewart", "Sullivan", "Taylor", "Thomas", "Thompson", "Torres",
    "Turner", "Walker", "Ward", "Watson", "White", "Williams", "Wilson", "Wood", "Wright",
    "Young",
];

pub const STREET_STEMS: &[&str] = &[
    "Acacia", "Alder", "Ash", "Aspen", "Bay", "Beech", "Birch", "Bridge", "Brook", "Cedar",
    "Chapel", "Cherry", "Chestnut", "Church", "Cliff", "Clover", "Cove", "Cypress", "Dale",
    "Elm", "Fern", "Forest", "Garden", "Glen", "Grove", "Harbor", "Hawthorn", "Heather",
    "Hickory", "Highland", "Hill", "Holly", "Juniper", "Lake", "Laurel", "Linden", "Magnolia",
    "Maple", "Meadow", "Mill", "Oak", "Orchard", "Park", "Pine", "Poplar", "Prospect",
    "Quarry", "Railroad", "Ridge", "River", "Rose", "Sage", "School", "Spring", "Spruce",
    "Station", "Summit", "Sunset", "Sycamore", "Valley", "Walnut", "Willow", "Windmill",
];

pub const STREET_SUFFIXES: &[&str] = &[
    "Avenue", "Boulevard", "Circle", "Court", "Crescent", "Drive", "Lane", "Parkway", "Place",
    "Road", "Row", "Square", "Street", "Terrace", "Trail", "Way",
];

pub const CITIES: &[&str] = &[
    "Aberdeen", "Ashford", "Bayview", "Bellmont", "Bridgeport", "Brookfield", "Cedar Falls",
    "Clearwater", "Clifton", "Dover", "Eastbury", "Elmwood", "Fairview", "Franklin",
    "Georgetown", "Glendale", "Greenville", "Hamilton", "Harborview", "Hillcrest", "Kingston",
    "Lakeside", "Lexington", "Madison", "Maplewood", "Marion", "Milford", "Newport",
    "Northfield", "Oakridge", "Oxford", "Pinehurst", "Riverside", "Rockport", "Salem",
    "Shelbyville", "Springfield", "Stonebridge", "Summerville", "Westfield", "Winchester",
    "Woodstock",
];

pub const COUNTRIES: &[&str] = &[
    "Argentina", "Australia", "Austria", "Belgium", "Brazil", "Canada", "Chile", "Croatia",
    "Czech Republic", "Denmark", "Egypt", "Estonia", "Finland", "France", "Germany", "Ghana",
    "Greece", "Hungary", "Iceland", "India", "Indonesia", "Ireland", "Italy", "Japan", "Kenya",
    "Korea, Republic of", "Mexico", "Morocco", "Netherlands", "New Zealand", "Nigeria",
    "Norway", "Peru", "Philippines", "Poland", "Portugal", "Romania", "Singapore",
    "South Africa", "Spain", "Sweden", "Switzerland", "Thailand", "Turkey", "Ukraine",
    "United Kingdom", "United States of America", "Uruguay", "Vietnam",
];

/// International dialling prefixes used to build MSISDN-style phone numbers.
pub const DIAL_PREFIXES: &[&str] = &["1", "31", "33", "34", "39", "44", "49", "61", "81"];

//! Stimulus Catalogue
//!
//! Fixed texts, category definitions, test items and screen layout.

use crate::display::Placement;
use crate::session::Group;

pub const INTRO_TEXT: &str = "Hello, dear participant!\n\n\
Congratulations, you are taking part in a real scientific experiment! \
Please read this instruction carefully, because the future of science depends on you :)\n\n\
You will study a set of new, artificial objects that belong to one category. \
Your goal is to remember information about this set. Next, you will be shown sets of illustrations \
describing the category. Pay attention to the functions of each object and its parts. \
Remember how they are used.\n\n\
After studying, you will see test objects one by one. You will need to decide whether each object \
belongs to the category you studied. Answer 'yes' or 'no' with the corresponding keys.\n\n\
If you answer 'yes', rate how typical this object is for the category on a scale from 1 \
(not at all typical) to 7 (very typical). Do not look at the descriptions or illustrations during \
the test. Use only your knowledge gained during the study stage.\n\n\
Good luck! Press any key to continue.";

pub const DECISION_PROMPT: &str = "Does this part belong to the learned category? (y - yes/n - no)";
pub const RATING_PROMPT: &str = "Rate typicality (1-7): ";

pub const YES_KEY: char = 'y';
pub const NO_KEY: char = 'n';

/// What a group learns about tuks
#[derive(Debug)]
pub struct CategoryDefinition {
    pub description: &'static str,
    pub instruction: &'static str,
    /// Shown in this order
    pub exemplars: &'static [&'static str],
}

pub static CATEGORY_A: CategoryDefinition = CategoryDefinition {
    description: "Tuks are animal-catching devices.",
    instruction: "Quinese hunters use tuks to catch Bondu, a type of animal that people like to eat in the Quine country. \
To catch a Bondu with a tuk, grab the tuk at its handle (3). \
Once a Bondu is spotted, throw the loop (1) over the Bondu's neck and quickly pull the string (4) at the end to tighten the loop. \
The cover (2) in front of the handle protects your hand from being bitten or scratched by the animal.",
    exemplars: &["./exampl.jpg"],
};

pub static CATEGORY_B: CategoryDefinition = CategoryDefinition {
    description: "Tuks are pesticide-spraying devices.",
    instruction: "Quinese people use tuks to spray pesticides. The triangular-shaped bottle (2) contains the pesticides. \
When (3) it is unscrewed, the pesticides flow out through the hose (4). \
The loop (1) is used to hang the tuk on the wall.",
    exemplars: &["./exampl.jpg"],
};

pub fn category(group: Group) -> &'static CategoryDefinition {
    match group {
        Group::A => &CATEGORY_A,
        Group::B => &CATEGORY_B,
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct TestItem {
    pub label: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

pub static TEST_ITEMS: [TestItem; 3] = [
    TestItem {
        label: "Consistent A",
        description: "Consistent A Item (retains crucial features for Group A)",
        image: "./A.jpg",
    },
    TestItem {
        label: "Consistent B",
        description: "Consistent B Item (retains crucial features for Group B)",
        image: "./B.jpg",
    },
    TestItem {
        label: "Control",
        description: "Control Item (no crucial features)",
        image: "./C.jpg",
    },
];

pub fn test_item(label: &str) -> Option<&'static TestItem> {
    TEST_ITEMS.iter().find(|item| item.label == label)
}

// Layout, in logical units on the 800x600 canvas
pub const INTRO_BOX: Placement = Placement::new(0.0, 0.0, 760.0, 560.0);
pub const DESCRIPTION_BOX: Placement = Placement::new(0.0, 200.0, 760.0, 80.0);
pub const EXEMPLAR_BOX: Placement = Placement::new(0.0, 0.0, 300.0, 300.0);
pub const INSTRUCTION_BOX: Placement = Placement::new(0.0, -225.0, 760.0, 150.0);
pub const QUESTION_BOX: Placement = Placement::new(0.0, 220.0, 760.0, 80.0);
pub const TEST_IMAGE_BOX: Placement = Placement::new(0.0, -50.0, 200.0, 300.0);
pub const RATING_BOX: Placement = Placement::new(0.0, 0.0, 760.0, 80.0);
pub const FORM_BOX: Placement = Placement::new(0.0, 40.0, 500.0, 60.0);
pub const FORM_HINT_BOX: Placement = Placement::new(0.0, -40.0, 500.0, 40.0);

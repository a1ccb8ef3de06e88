use rand::Rng;

/// Example prompts offered by the "surprise me" button
pub const SURPRISE_PROMPTS: &[&str] = &[
    "an astronaut lounging in a tropical resort in space, vaporwave",
    "a pencil and watercolor drawing of a bright city in the future with flying cars",
    "a photo of a white fur monster standing in a purple room",
    "a bowl of soup that looks like a monster, knitted out of wool",
    "a fortune-telling shiba inu reading your fate in a giant hamburger",
    "a stained glass window depicting a hamburger and french fries",
    "a sunlit indoor lounge area with a pool with clear water",
    "an oil painting portrait of a capybara wearing medieval royal robes",
    "a van gogh style painting of an american football player",
    "a synthwave style sunset above the reflecting water of the sea, digital art",
    "a 3d render of a small, round, fluffy creature with big expressive eyes",
    "a teddy bear on a skateboard in times square, photorealistic",
    "an armchair in the shape of an avocado",
    "a macro photograph of a brain-shaped coral reef",
    "a velociraptor working at a hotdog stand, lomography",
    "a tiger wearing a train conductor's hat and holding a skateboard",
];

/// Pick a random example prompt different from the current one.
/// Pure local transform, no network involved.
pub fn random_prompt(current: &str) -> &'static str {
    let mut rng = rand::thread_rng();
    loop {
        let pick = SURPRISE_PROMPTS[rng.gen_range(0..SURPRISE_PROMPTS.len())];
        if pick != current {
            return pick;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_prompt_comes_from_the_list() {
        let prompt = random_prompt("");
        assert!(SURPRISE_PROMPTS.contains(&prompt));
    }

    #[test]
    fn test_random_prompt_never_repeats_the_current_value() {
        // run enough rounds that a repeat would almost surely show up
        let current = SURPRISE_PROMPTS[0];
        for _ in 0..200 {
            assert_ne!(random_prompt(current), current);
        }
    }
}

//! Session randomization.
//!
//! Draws an unbiased random sample of a subject's questions and reshuffles
//! each drawn question's options independently, recomputing `correct_index`
//! afterwards. Uses swap-based Fisher-Yates shuffles throughout; the bank
//! itself is never touched.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Question, OPTION_COUNT};

/// Draw `sample_size` randomized questions from the bank (clamped to the
/// bank size). Returned questions are independent copies.
pub fn draw(questions: &[Question], sample_size: usize) -> Vec<Question> {
    draw_with_rng(questions, sample_size, &mut rand::thread_rng())
}

/// Same as [`draw`] with an explicit RNG, which keeps tests deterministic.
pub fn draw_with_rng<R: Rng>(
    questions: &[Question],
    sample_size: usize,
    rng: &mut R,
) -> Vec<Question> {
    let mut sample: Vec<Question> = questions.to_vec();
    sample.shuffle(rng);
    sample.truncate(sample_size.min(questions.len()));

    sample
        .into_iter()
        .map(|question| shuffle_options(question, rng))
        .collect()
}

/// Reorder one question's options, keeping text and image paired, and
/// recompute which position is graded as correct.
fn shuffle_options<R: Rng>(question: Question, rng: &mut R) -> Question {
    let Question {
        id,
        text,
        image,
        options,
        option_images,
        correct_index,
    } = question;

    // Tag each option with whether it was the authored correct one, then
    // shuffle the tagged triples as a unit.
    let mut entries: Vec<(String, Option<String>, bool)> = options
        .into_iter()
        .zip(option_images)
        .enumerate()
        .map(|(i, (option, option_image))| (option, option_image, i == correct_index))
        .collect();
    entries.shuffle(rng);

    // Exactly one entry carries the flag; the shuffle can neither lose nor
    // duplicate it.
    let new_correct = entries
        .iter()
        .position(|(_, _, is_correct)| *is_correct)
        .unwrap_or(0);

    let mut options: [String; OPTION_COUNT] = Default::default();
    let mut option_images: [Option<String>; OPTION_COUNT] = Default::default();
    for (i, (option, option_image, _)) in entries.into_iter().enumerate() {
        options[i] = option;
        option_images[i] = option_image;
    }

    Question {
        id,
        text,
        image,
        options,
        option_images,
        correct_index: new_correct,
    }
}

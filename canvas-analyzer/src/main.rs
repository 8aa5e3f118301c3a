use anyhow::{Context, Result};
use app_utils::{InitFromEnv, init_from_env, init_tracing};
use canvas_analyzer::summary::{filter_available_courses, summarize_points};
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let InitFromEnv {
        client,
        user,
        course_selector,
    } = init_from_env()?;
    debug!("initialized");

    let profile = client
        .get_user(&user)
        .await
        .context("could not get the user profile from Canvas")?;
    println!("Name: {}", profile.name());
    println!("Title: {}", profile.title());
    println!("Primary Email: {}", profile.primary_email());
    println!("Bio: {}", profile.bio());
    println!();

    let courses = filter_available_courses(
        client
            .get_courses(&user)
            .await
            .context("could not get courses from Canvas")?,
    );
    for course in &courses {
        println!("{} : {}", course.id(), course.name());
    }

    let course_selector =
        course_selector.context("set COURSE to the id or name of one of the listed courses")?;
    let course = course_selector
        .select_from(&courses)
        .with_context(|| format!("could not find course with selector {course_selector:?}"))?;

    let submissions = client
        .get_submissions(course.id(), &user)
        .await
        .context("could not get submissions from Canvas")?;

    println!();
    println!("{}", summarize_points(&submissions));

    Ok(())
}

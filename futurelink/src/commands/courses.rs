use futurelink_config::Config;

pub fn list_courses(config: Config) {
    for course in &config.enrollment.courses {
        println!("{}", course.as_str());
    }
}

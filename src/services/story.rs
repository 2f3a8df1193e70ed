/// Fill the heritage story template with the craft `topic`
pub fn generate_story(topic: &str) -> String {
    format!(
        "Once, in the heart of India, a craftsperson skilled in {} began a new masterpiece. \
         With every touch, a story of heritage and passion was woven into the creation, \
         a testament to generations of artistry.",
        topic
    )
}

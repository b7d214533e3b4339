/// One of the 7 fixed prompt templates representing a realistic user query
/// pattern about a brand.
pub struct Scenario {
    pub key: &'static str,
    pub title: &'static str,
    render: fn(&str, &str, &str) -> String,
}

impl Scenario {
    pub fn prompt(&self, brand_name: &str, domain: &str, industry: &str) -> String {
        (self.render)(brand_name, domain, industry)
    }
}

pub const SCENARIOS: [Scenario; 7] = [
    Scenario {
        key: "s1",
        title: "Brand Overview",
        render: |brand_name, domain, industry| {
            format!(
                "Who is {brand_name} and what does it offer? Please provide information about this {industry} company at {domain}."
            )
        },
    },
    Scenario {
        key: "s2",
        title: "Trust & Legitimacy",
        render: |brand_name, _domain, _industry| {
            format!(
                "Is {brand_name} legitimate and trustworthy? What do people say about this company?"
            )
        },
    },
    Scenario {
        key: "s3",
        title: "Products & Services",
        render: |brand_name, _domain, industry| {
            format!(
                "What are the top products or services from {brand_name}? What does this {industry} company specialize in?"
            )
        },
    },
    Scenario {
        key: "s4",
        title: "Comparison & Competitors",
        render: |brand_name, _domain, industry| {
            format!(
                "How does {brand_name} compare to competitors in the {industry} space? What makes {brand_name} different?"
            )
        },
    },
    Scenario {
        key: "s5",
        title: "Reviews & Experience",
        render: |brand_name, _domain, industry| {
            format!(
                "What are customer reviews and experiences with {brand_name}? What do users think about {brand_name}'s {industry} services?"
            )
        },
    },
    Scenario {
        key: "s6",
        title: "Use Cases & Solutions",
        render: |brand_name, _domain, industry| {
            format!(
                "What problems does {brand_name} solve? Who should use {brand_name}? When should I use {brand_name} for my {industry} needs?"
            )
        },
    },
    Scenario {
        key: "s7",
        title: "News & Updates",
        render: |brand_name, _domain, industry| {
            format!(
                "What's new with {brand_name}? Any recent updates or announcements? What is {brand_name} known for in the {industry} space?"
            )
        },
    },
];

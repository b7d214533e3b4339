use reqwest::Client;
use robotstxt::DefaultMatcher;

/// Parsed robots.txt rules for one domain. Fails open: a missing or
/// unreachable robots.txt means every URL is allowed.
pub struct RobotsRules {
    content: Option<String>,
    user_agent: String,
}

impl RobotsRules {
    pub async fn fetch(client: &Client, domain: &str, user_agent: &str) -> Self {
        let robots_url = format!("https://{}/robots.txt", domain);

        let content = match client.get(&robots_url).send().await {
            Ok(res) if res.status().is_success() => match res.text().await {
                Ok(body) => Some(body),
                Err(e) => {
                    log::warn!("Failed to read robots.txt body for {}: {:?}", domain, e);
                    None
                }
            },
            Ok(res) => {
                log::info!(
                    "No robots.txt for {} (status {}), allowing all",
                    domain,
                    res.status()
                );
                None
            }
            Err(e) => {
                log::warn!("Failed to fetch robots.txt for {}: {:?}", domain, e);
                None
            }
        };

        RobotsRules {
            content,
            user_agent: user_agent.to_string(),
        }
    }

    pub fn from_content(content: &str, user_agent: &str) -> Self {
        RobotsRules {
            content: Some(content.to_string()),
            user_agent: user_agent.to_string(),
        }
    }

    pub fn allow_all(user_agent: &str) -> Self {
        RobotsRules {
            content: None,
            user_agent: user_agent.to_string(),
        }
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        match &self.content {
            None => true,
            Some(content) => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(content, &self.user_agent, url)
            }
        }
    }
}

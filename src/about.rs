//! Static content for the About screen.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoCard {
    pub title: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub name: &'static str,
    pub blurb: &'static str,
    pub url: &'static str,
}

/// An external link the About screen can open. `key` is the hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub key: char,
    pub label: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub name: &'static str,
    pub title: &'static str,
    pub bio: &'static str,
    pub cards: &'static [InfoCard],
    pub skills: &'static [InfoCard],
    pub projects: &'static [Project],
    pub links: &'static [Link],
}

pub const PROFILE: Profile = Profile {
    name: "Arhaan Girdhar",
    title: "Software Engineer & AI Enthusiast",
    bio: "A passionate developer with a strong foundation in software engineering and a keen interest in artificial intelligence.",
    cards: &[
        InfoCard {
            title: "Education",
            body: "B.Tech in Computer Science",
        },
        InfoCard {
            title: "Location",
            body: "Noida, India",
        },
        InfoCard {
            title: "Contact",
            body: "17arhaan.connect@gmail.com",
        },
    ],
    skills: &[
        InfoCard {
            title: "AI & ML",
            body: "Deep expertise in machine learning, natural language processing, and artificial intelligence applications.",
        },
        InfoCard {
            title: "Problem Solving",
            body: "Strong analytical and problem-solving skills with a track record of delivering innovative solutions.",
        },
    ],
    projects: &[
        Project {
            name: "Twitter Sentiment Analysis",
            blurb: "Real-time sentiment analysis of tweets using NLP and Twitter API.",
            url: "https://sentiment-analysis-sepia.vercel.app/",
        },
        Project {
            name: "Personal Portfolio",
            blurb: "Modern portfolio showcasing my projects and skills.",
            url: "https://www.arhaanportfolio.in",
        },
    ],
    links: &[
        Link {
            key: 'g',
            label: "GitHub",
            url: "https://github.com/17arhaan",
        },
        Link {
            key: 'l',
            label: "LinkedIn",
            url: "https://www.linkedin.com/in/arhaan17/",
        },
        Link {
            key: 'p',
            label: "Portfolio",
            url: "https://www.arhaanportfolio.in",
        },
        Link {
            key: 'm',
            label: "Email",
            url: "mailto:17arhaan.connect@gmail.com",
        },
    ],
};

impl Profile {
    pub fn link_for(&self, key: char) -> Option<&'static Link> {
        self.links.iter().find(|l| l.key == key)
    }
}

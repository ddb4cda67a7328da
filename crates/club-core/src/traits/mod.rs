mod repositories;

pub use repositories::{
    ApplicationRepository, BlogRepository, BugRepository, EventRepository, MemberFilter,
    MemberRepository, RepoResult, UserRepository,
};

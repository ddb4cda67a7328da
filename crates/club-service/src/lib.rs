//! # club-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ApplicationService, AuthService, BlogService, BugService, EventService, MemberService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};

pub use dto::{
    ApiResponse, ApplicationResponse, BlogResponse, BugResponse, CreateBlogRequest,
    CreateBugRequest, CreateEventRequest, CreateMemberRequest, CurrentUserResponse, EventResponse,
    HealthResponse, MemberResponse, PaginatedResponse, PromoteUserRequest, ReadinessResponse,
    RegistrationResponse, ReviewApplicationRequest, SubmitApplicationRequest, UpdateBlogRequest,
    UpdateBugRequest, UpdateEventRequest, UpdateMemberRequest, UpvoteResponse, UserResponse,
};

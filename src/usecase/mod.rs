//! UseCase layer: orchestration over the domain's collaborator interfaces.

mod load_directory;
mod resolve_room;
mod start_room;

pub use load_directory::LoadDirectoryUseCase;
pub use resolve_room::ResolveRoomUseCase;
pub use start_room::StartRoomUseCase;

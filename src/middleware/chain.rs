use tracing::debug;
use super::{Middleware, MiddlewareError, Reply, Request};

#[derive(Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Box<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new()
        }
    }

    /// 미들웨어를 등록합니다. 같은 이름은 서버당 한 번만 등록할 수 있습니다.
    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) -> Result<(), MiddlewareError> {
        if self.contains(middleware.name()) {
            return Err(MiddlewareError::Config(format!(
                "이미 등록된 미들웨어: {}",
                middleware.name()
            )));
        }

        debug!(middleware = %middleware.name(), "미들웨어 등록");
        self.middlewares.push(Box::new(middleware));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.middlewares.iter().any(|m| m.name() == name)
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    pub async fn execute_request_chain(
        &self,
        mut request: Request,
    ) -> Result<Request, MiddlewareError> {
        for middleware in &self.middlewares {
            request = middleware.handle_request(request).await?;
        }
        Ok(request)
    }

    pub async fn execute_response_chain(
        &self,
        mut reply: Reply,
    ) -> Result<Reply, MiddlewareError> {
        // 응답은 역순으로 처리
        for middleware in self.middlewares.iter().rev() {
            reply = middleware.handle_response(reply).await?;
        }
        Ok(reply)
    }
}
